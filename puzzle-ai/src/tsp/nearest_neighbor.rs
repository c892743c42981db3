//! 最近邻贪心

use protocol::{DistanceMatrix, Tour};
use tracing::debug;

use super::accepts;

/// 从起点出发每次走向最近的未访问城市，最后回到起点
///
/// 距离相同时取给定顺序中靠前的城市。
pub fn nearest_neighbor(matrix: &DistanceMatrix, home: usize, cities: &[usize]) -> Tour {
    if !accepts(matrix, home, cities, "最近邻") {
        return Tour::empty();
    }

    let mut remaining = cities.to_vec();
    let mut route = Vec::with_capacity(cities.len());
    let mut current = home;
    let mut distance = 0;

    while !remaining.is_empty() {
        let mut nearest = 0;
        for i in 1..remaining.len() {
            if matrix.distance(current, remaining[i]) < matrix.distance(current, remaining[nearest]) {
                nearest = i;
            }
        }
        let next = remaining.remove(nearest);
        distance += matrix.distance(current, next);
        route.push(next);
        current = next;
    }
    distance += matrix.distance(current, home);

    debug!("最近邻: 路线 {:?} 距离 {}", route, distance);
    Tour { route, distance }
}
