//! 旅行商问题
//!
//! 三个求解器共用同一套输入校验：无效输入（城市不足、包含起点、重复、越界）
//! 统一返回空路线，不报错。

mod brute_force;
mod genetic;
mod nearest_neighbor;

pub use brute_force::brute_force;
pub use genetic::{genetic, GeneticConfig, GeneticConfigError, GeneticSolver};
pub use nearest_neighbor::nearest_neighbor;

use std::time::Instant;

use protocol::{validate_cities, DistanceMatrix, BRUTE_FORCE_MAX_CITIES};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use protocol::Tour;

/// 求解算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TspAlgorithm {
    BruteForce,
    NearestNeighbor,
    Genetic,
}

impl TspAlgorithm {
    pub const ALL: [TspAlgorithm; 3] = [
        TspAlgorithm::BruteForce,
        TspAlgorithm::NearestNeighbor,
        TspAlgorithm::Genetic,
    ];

    /// 成绩记录中的算法名
    pub fn display_name(&self) -> &'static str {
        match self {
            TspAlgorithm::BruteForce => "Brute Force",
            TspAlgorithm::NearestNeighbor => "Nearest Neighbor",
            TspAlgorithm::Genetic => "Genetic Algorithm",
        }
    }

    /// 求解；遗传算法使用给定配置与随机源
    pub fn solve<R: Rng + ?Sized>(
        &self,
        matrix: &DistanceMatrix,
        home: usize,
        cities: &[usize],
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Tour {
        match self {
            TspAlgorithm::BruteForce => brute_force(matrix, home, cities),
            TspAlgorithm::NearestNeighbor => nearest_neighbor(matrix, home, cities),
            TspAlgorithm::Genetic => match GeneticSolver::new(config.clone()) {
                Ok(solver) => solver.solve(matrix, home, cities, rng),
                Err(e) => {
                    debug!("遗传算法配置无效: {}", e);
                    Tour::empty()
                }
            },
        }
    }

    /// 求解并计时
    pub fn solve_timed<R: Rng + ?Sized>(
        &self,
        matrix: &DistanceMatrix,
        home: usize,
        cities: &[usize],
        config: &GeneticConfig,
        rng: &mut R,
    ) -> TimedTour {
        let start = Instant::now();
        let tour = self.solve(matrix, home, cities, config, rng);
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "{}: 距离 {}，用时 {:.3}ms",
            self.display_name(),
            tour.distance,
            time_ms
        );
        TimedTour {
            algorithm: *self,
            tour,
            time_ms,
        }
    }
}

/// 带用时的求解结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedTour {
    pub algorithm: TspAlgorithm,
    pub tour: Tour,
    /// 求解用时（毫秒）
    pub time_ms: f64,
}

/// 多个算法在同一输入上的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspComparison {
    pub results: Vec<TimedTour>,
}

impl TspComparison {
    /// 距离最短的结果，距离相同取先求解的算法；全部为空路线时返回 None
    pub fn shortest(&self) -> Option<&TimedTour> {
        self.results
            .iter()
            .filter(|r| !r.tour.is_empty())
            .reduce(|best, r| if r.tour.distance < best.tour.distance { r } else { best })
    }
}

/// 依次运行三个算法并计时，城市数超过穷举上限时跳过穷举
pub fn compare<R: Rng + ?Sized>(
    matrix: &DistanceMatrix,
    home: usize,
    cities: &[usize],
    config: &GeneticConfig,
    rng: &mut R,
) -> TspComparison {
    let mut results = Vec::with_capacity(TspAlgorithm::ALL.len());
    for algo in TspAlgorithm::ALL {
        if algo == TspAlgorithm::BruteForce && cities.len() > BRUTE_FORCE_MAX_CITIES {
            debug!("{} 个城市超过穷举上限 {}，跳过", cities.len(), BRUTE_FORCE_MAX_CITIES);
            continue;
        }
        results.push(algo.solve_timed(matrix, home, cities, config, rng));
    }
    TspComparison { results }
}

/// 输入是否有效，无效时记录原因
pub(crate) fn accepts(matrix: &DistanceMatrix, home: usize, cities: &[usize], solver: &str) -> bool {
    match validate_cities(matrix, home, cities) {
        Ok(()) => true,
        Err(e) => {
            debug!("{}: 输入无效，返回空路线: {}", solver, e);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use protocol::DistanceMatrix;

    /// 4 个顶点的非对称矩阵，起点 0 到城市 [1,2,3] 的最优环路为 21
    pub fn small_matrix() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![0, 2, 9, 10],
            vec![1, 0, 6, 4],
            vec![15, 7, 0, 8],
            vec![6, 3, 12, 0],
        ])
        .unwrap()
    }
}
