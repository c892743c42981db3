//! 穷举所有排列

use protocol::{DistanceMatrix, Tour, TspInputError, BRUTE_FORCE_MAX_CITIES};
use tracing::debug;

use super::accepts;

/// 穷举求最优环路，超过 7 个城市时返回空路线
///
/// 排列按城市给出顺序的字典序生成，距离相同时保留最先找到的。
pub fn brute_force(matrix: &DistanceMatrix, home: usize, cities: &[usize]) -> Tour {
    if !accepts(matrix, home, cities, "暴力搜索") {
        return Tour::empty();
    }
    if cities.len() > BRUTE_FORCE_MAX_CITIES {
        debug!(
            "暴力搜索: {}",
            TspInputError::TooManyCities {
                count: cities.len(),
                max: BRUTE_FORCE_MAX_CITIES,
            }
        );
        return Tour::empty();
    }

    let mut search = Search {
        matrix,
        home,
        cities,
        used: vec![false; cities.len()],
        route: Vec::with_capacity(cities.len()),
        best: None,
        permutations: 0,
    };
    search.permute(home, 0);

    debug!("暴力搜索: 枚举 {} 个排列", search.permutations);
    search.best.unwrap_or_else(Tour::empty)
}

struct Search<'a> {
    matrix: &'a DistanceMatrix,
    home: usize,
    cities: &'a [usize],
    used: Vec<bool>,
    route: Vec<usize>,
    best: Option<Tour>,
    permutations: u64,
}

impl Search<'_> {
    /// `last` 为当前路线末端，`distance` 为起点到末端的累计距离
    fn permute(&mut self, last: usize, distance: u64) {
        if self.route.len() == self.cities.len() {
            self.permutations += 1;
            let total = distance + self.matrix.distance(last, self.home);
            if self.best.as_ref().map_or(true, |b| total < b.distance) {
                self.best = Some(Tour {
                    route: self.route.clone(),
                    distance: total,
                });
            }
            return;
        }

        for i in 0..self.cities.len() {
            if self.used[i] {
                continue;
            }
            let city = self.cities[i];
            self.used[i] = true;
            self.route.push(city);
            self.permute(city, distance + self.matrix.distance(last, city));
            self.route.pop();
            self.used[i] = false;
        }
    }
}
