//! 汉诺塔求解
//!
//! - 三柱递归：经典分治，2^n - 1 步
//! - 三柱迭代：按步序号轮换柱对，每次把较小的栈顶移到另一根柱
//! - 四柱 Frame–Stewart：先把 k 个小盘移到一根空柱，再用三柱法移剩余盘

use protocol::{HanoiError, HanoiMove, FOUR_PEGS, MAX_DISKS, THREE_PEGS};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 求解算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HanoiAlgorithm {
    Recursive,
    Iterative,
    FrameStewart,
}

impl HanoiAlgorithm {
    pub const ALL: [HanoiAlgorithm; 3] = [
        HanoiAlgorithm::Recursive,
        HanoiAlgorithm::Iterative,
        HanoiAlgorithm::FrameStewart,
    ];

    /// 提交记录中的游戏类型名
    pub fn game_type(&self) -> &'static str {
        match self {
            HanoiAlgorithm::Recursive => "recursive",
            HanoiAlgorithm::Iterative => "iterative",
            HanoiAlgorithm::FrameStewart => "frameStewart",
        }
    }

    /// 按游戏类型名查找
    pub fn from_game_type(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.game_type() == name)
    }

    /// 使用的柱子，第一根为起点
    pub fn pegs(&self) -> &'static [char] {
        match self {
            HanoiAlgorithm::Recursive | HanoiAlgorithm::Iterative => &THREE_PEGS,
            HanoiAlgorithm::FrameStewart => &FOUR_PEGS,
        }
    }

    /// 目标柱
    pub fn destination(&self) -> char {
        match self {
            HanoiAlgorithm::Recursive | HanoiAlgorithm::Iterative => 'C',
            HanoiAlgorithm::FrameStewart => 'D',
        }
    }

    /// 生成 n 个盘子的完整走法，盘子数超过上限时返回错误
    pub fn solve(&self, n: u32) -> Result<Vec<HanoiMove>, HanoiError> {
        check_disks(n)?;
        let moves = match self {
            HanoiAlgorithm::Recursive => hanoi_recursive(n, 'A', 'B', 'C'),
            HanoiAlgorithm::Iterative => hanoi_iterative(n, 'A', 'B', 'C'),
            HanoiAlgorithm::FrameStewart => frame_stewart(n, FOUR_PEGS),
        };
        debug!("汉诺塔 {} n={}: {} 步", self.game_type(), n, moves.len());
        Ok(moves)
    }
}

/// 盘子数检查
pub fn check_disks(n: u32) -> Result<(), HanoiError> {
    if n > MAX_DISKS {
        return Err(HanoiError::TooManyDisks {
            count: n,
            max: MAX_DISKS,
        });
    }
    Ok(())
}

/// 三柱递归解法
pub fn hanoi_recursive(n: u32, source: char, auxiliary: char, destination: char) -> Vec<HanoiMove> {
    let mut moves = Vec::new();
    recurse(n, source, auxiliary, destination, &mut moves);
    moves
}

fn recurse(n: u32, source: char, auxiliary: char, destination: char, out: &mut Vec<HanoiMove>) {
    if n == 0 {
        return;
    }
    recurse(n - 1, source, destination, auxiliary, out);
    out.push(HanoiMove::new(source, destination));
    recurse(n - 1, auxiliary, source, destination, out);
}

/// 三柱迭代解法，与递归解法走法相同
pub fn hanoi_iterative(
    n: u32,
    source: char,
    auxiliary: char,
    destination: char,
) -> Vec<HanoiMove> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![HanoiMove::new(source, destination)];
    }

    let (auxiliary, destination) = if n % 2 == 0 {
        (destination, auxiliary)
    } else {
        (auxiliary, destination)
    };

    let Some(total) = optimal_three_peg_moves(n) else {
        warn!("汉诺塔 n={} 步数超出 u64 范围", n);
        return Vec::new();
    };

    let labels = [source, destination, auxiliary];
    let mut pegs: [Vec<u32>; 3] = [(1..=n).rev().collect(), Vec::new(), Vec::new()];
    let mut moves = Vec::with_capacity(total.min(1 << MAX_DISKS) as usize);

    for i in 1..=total {
        let (a, b) = match i % 3 {
            1 => (0, 1),
            2 => (0, 2),
            _ => (1, 2),
        };
        // 空柱视为无穷大
        let top_a = pegs[a].last().copied().unwrap_or(u32::MAX);
        let top_b = pegs[b].last().copied().unwrap_or(u32::MAX);
        let (from, to) = if top_a < top_b { (a, b) } else { (b, a) };

        if let Some(disk) = pegs[from].pop() {
            pegs[to].push(disk);
        }
        moves.push(HanoiMove::new(labels[from], labels[to]));
    }
    moves
}

/// 四柱 Frame–Stewart 解法
///
/// `pegs` 依次为 [起点, 中转1, 中转2, 目标]。
/// k = n - floor(sqrt(2n))：k 个小盘经四柱移到中转1，剩余 n-k 个经中转2 用三柱法移到目标，
/// 再把 k 个小盘经四柱移到目标。
pub fn frame_stewart(n: u32, pegs: [char; 4]) -> Vec<HanoiMove> {
    let mut moves = Vec::new();
    stewart(n, pegs, &mut moves);
    moves
}

fn stewart(n: u32, [source, spare1, spare2, destination]: [char; 4], out: &mut Vec<HanoiMove>) {
    match n {
        0 => {}
        1 => out.push(HanoiMove::new(source, destination)),
        _ => {
            let k = n - (2.0 * n as f64).sqrt().floor() as u32;
            stewart(k, [source, destination, spare2, spare1], out);
            recurse(n - k, source, spare2, destination, out);
            stewart(k, [spare1, source, spare2, destination], out);
        }
    }
}

/// 三柱最少步数 2^n - 1，超出 u64 时返回 None
pub fn optimal_three_peg_moves(n: u32) -> Option<u64> {
    1u64.checked_shl(n).map(|pow| pow - 1)
}
