//! 遗传算法
//!
//! 每代按环路距离升序排序，保留前 2 名，其余个体由前 10 名中随机挑选的
//! 两个父代做顺序交叉 (OX) 产生，再以 `mutation_rate` 的概率交换两个位置。

use protocol::{
    tour_distance, DistanceMatrix, Tour, DEFAULT_GENERATIONS, DEFAULT_MUTATION_RATE,
    DEFAULT_POPULATION_SIZE, ELITE_COUNT, PARENT_POOL_SIZE,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::accepts;

/// 遗传算法参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            mutation_rate: DEFAULT_MUTATION_RATE,
        }
    }
}

/// 参数错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticConfigError {
    #[error("Population size must be at least {min}, got {got}")]
    PopulationTooSmall { got: usize, min: usize },

    #[error("Mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f64),
}

impl GeneticConfig {
    /// 种群至少要容纳精英个体，变异率在 [0, 1]
    pub fn validate(&self) -> Result<(), GeneticConfigError> {
        if self.population_size < ELITE_COUNT {
            return Err(GeneticConfigError::PopulationTooSmall {
                got: self.population_size,
                min: ELITE_COUNT,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GeneticConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// 遗传算法求解器
pub struct GeneticSolver {
    config: GeneticConfig,
}

struct Individual {
    route: Vec<usize>,
    distance: u64,
}

impl GeneticSolver {
    pub fn new(config: GeneticConfig) -> Result<Self, GeneticConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// 求解，结果为最后一代中距离最短的个体
    pub fn solve<R: Rng + ?Sized>(
        &self,
        matrix: &DistanceMatrix,
        home: usize,
        cities: &[usize],
        rng: &mut R,
    ) -> Tour {
        if !accepts(matrix, home, cities, "遗传算法") {
            return Tour::empty();
        }

        let size = self.config.population_size;
        let mut population: Vec<Vec<usize>> = (0..size)
            .map(|_| {
                let mut route = cities.to_vec();
                route.shuffle(rng);
                route
            })
            .collect();

        // 父代窗口不超过种群大小
        let pool = PARENT_POOL_SIZE.min(size);

        for generation in 0..self.config.generations {
            let scored = score(matrix, home, population);
            if generation % 20 == 0 {
                debug!("遗传算法: 第 {} 代最优距离 {}", generation, scored[0].distance);
            }

            let mut next: Vec<Vec<usize>> = scored[..ELITE_COUNT]
                .iter()
                .map(|ind| ind.route.clone())
                .collect();
            while next.len() < size {
                let parent1 = &scored[rng.gen_range(0..pool)].route;
                let parent2 = &scored[rng.gen_range(0..pool)].route;
                let mut child = order_crossover(parent1, parent2, rng);
                self.mutate(&mut child, rng);
                next.push(child);
            }
            population = next;
        }

        let mut best: Option<Individual> = None;
        for route in population {
            let distance = tour_distance(matrix, home, &route);
            if best.as_ref().map_or(true, |b| distance < b.distance) {
                best = Some(Individual { route, distance });
            }
        }

        match best {
            Some(ind) => {
                debug!("遗传算法: 路线 {:?} 距离 {}", ind.route, ind.distance);
                Tour {
                    route: ind.route,
                    distance: ind.distance,
                }
            }
            None => Tour::empty(),
        }
    }

    fn mutate<R: Rng + ?Sized>(&self, route: &mut [usize], rng: &mut R) {
        if rng.gen::<f64>() < self.config.mutation_rate {
            let i = rng.gen_range(0..route.len());
            let j = rng.gen_range(0..route.len());
            route.swap(i, j);
        }
    }
}

/// 计算距离并按升序排序（稳定排序，同距离保持原顺序）
fn score(matrix: &DistanceMatrix, home: usize, population: Vec<Vec<usize>>) -> Vec<Individual> {
    let mut scored: Vec<Individual> = population
        .into_iter()
        .map(|route| {
            let distance = tour_distance(matrix, home, &route);
            Individual { route, distance }
        })
        .collect();
    scored.sort_by_key(|ind| ind.distance);
    scored
}

/// 顺序交叉：随机取区间 [start, end] 复制 parent1，
/// 其余空位按顺序填入 parent2 中尚未出现的城市
fn order_crossover<R: Rng + ?Sized>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    let a = rng.gen_range(0..n);
    let b = rng.gen_range(0..n);
    let (start, end) = (a.min(b), a.max(b));
    crossover_segment(parent1, parent2, start, end)
}

fn crossover_segment(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    let mut child: Vec<Option<usize>> = vec![None; parent1.len()];
    for i in start..=end {
        child[i] = Some(parent1[i]);
    }

    let mut fill = parent2.iter().copied();
    for i in 0..child.len() {
        if child[i].is_some() {
            continue;
        }
        let city = fill.by_ref().find(|city| !child.contains(&Some(*city)));
        child[i] = city;
    }

    child.into_iter().flatten().collect()
}

/// 便捷入口：默认参数
pub fn genetic<R: Rng + ?Sized>(
    matrix: &DistanceMatrix,
    home: usize,
    cities: &[usize],
    rng: &mut R,
) -> Tour {
    GeneticSolver {
        config: GeneticConfig::default(),
    }
    .solve(matrix, home, cities, rng)
}
