//! 旅行商问题数据：距离矩阵与路线

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TspInputError;

/// 斯里兰卡 10 个主要城市
pub const SRI_LANKA_CITIES: [&str; 10] = [
    "Colombo",
    "Kandy",
    "Galle",
    "Jaffna",
    "Trincomalee",
    "Anuradhapura",
    "Batticaloa",
    "Matara",
    "Kurunegala",
    "Ratnapura",
];

/// 城市间近似公路距离（公里，对称）
const SRI_LANKA_DISTANCES: [[u64; 10]; 10] = [
    [0, 115, 120, 398, 261, 205, 312, 160, 94, 90],
    [115, 0, 230, 316, 182, 137, 215, 245, 42, 90],
    [120, 230, 0, 520, 340, 320, 420, 45, 210, 110],
    [398, 316, 520, 0, 233, 196, 340, 565, 270, 410],
    [261, 182, 340, 233, 0, 107, 110, 370, 170, 260],
    [205, 137, 320, 196, 107, 0, 210, 350, 90, 200],
    [312, 215, 420, 340, 110, 210, 0, 430, 200, 320],
    [160, 245, 45, 565, 370, 350, 430, 0, 230, 120],
    [94, 42, 210, 270, 170, 90, 200, 230, 0, 100],
    [90, 90, 110, 410, 260, 200, 320, 120, 100, 0],
];

/// 距离矩阵（n x n，对角线为 0）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    rows: Vec<Vec<u64>>,
}

impl DistanceMatrix {
    /// 从二维数组创建，非方阵时返回 None
    pub fn new(rows: Vec<Vec<u64>>) -> Option<Self> {
        let n = rows.len();
        if rows.iter().all(|row| row.len() == n) {
            Some(Self { rows })
        } else {
            None
        }
    }

    /// 斯里兰卡城市距离矩阵
    pub fn sri_lanka() -> Self {
        Self {
            rows: SRI_LANKA_DISTANCES.iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// 随机生成对称矩阵，非对角线距离在 [min, max] 内，上下界颠倒时自动交换
    pub fn random<R: Rng + ?Sized>(size: usize, min: u64, max: u64, rng: &mut R) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut rows = vec![vec![0; size]; size];
        for i in 0..size {
            for j in (i + 1)..size {
                let distance = rng.gen_range(min..=max);
                rows[i][j] = distance;
                rows[j][i] = distance;
            }
        }
        Self { rows }
    }

    /// 顶点数
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// 两点间距离
    pub fn distance(&self, from: usize, to: usize) -> u64 {
        self.rows[from][to]
    }

    /// 是否对称
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..n).all(|j| self.rows[i][j] == self.rows[j][i]))
    }

    /// 原始数据
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }
}

/// 求解结果：访问顺序与总距离
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    pub route: Vec<usize>,
    pub distance: u64,
}

impl Tour {
    /// 输入无效时的统一结果 `{route: [], distance: 0}`
    pub fn empty() -> Self {
        Self {
            route: Vec::new(),
            distance: 0,
        }
    }

    /// 是否为空结果
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }
}

/// 环路总距离：起点 -> route -> 起点
pub fn tour_distance(matrix: &DistanceMatrix, home: usize, route: &[usize]) -> u64 {
    let mut total = 0;
    let mut prev = home;
    for &city in route {
        total += matrix.distance(prev, city);
        prev = city;
    }
    total + matrix.distance(prev, home)
}

/// 所有求解器共用的输入校验
pub fn validate_cities(
    matrix: &DistanceMatrix,
    home: usize,
    cities: &[usize],
) -> Result<(), TspInputError> {
    if cities.len() < 2 {
        return Err(TspInputError::TooFewCities(cities.len()));
    }
    if cities.contains(&home) {
        return Err(TspInputError::HomeInCities(home));
    }
    let mut seen = HashSet::with_capacity(cities.len());
    for &city in cities {
        if !seen.insert(city) {
            return Err(TspInputError::DuplicateCity(city));
        }
    }
    let size = matrix.size();
    if let Some(&vertex) = std::iter::once(&home)
        .chain(cities)
        .find(|&&v| v >= size)
    {
        return Err(TspInputError::VertexOutOfRange { vertex, size });
    }
    Ok(())
}
