//! 益智游戏算法核心
//!
//! 包含:
//! - N 皇后位集回溯
//! - 骑士巡游（回溯 / Warnsdorff）
//! - 5x5 井字棋 Minimax 与随机模拟
//! - 汉诺塔（递归 / 迭代 / Frame–Stewart）
//! - 旅行商（穷举 / 最近邻 / 遗传算法）

pub mod hanoi;
pub mod knights_tour;
mod mcts;
mod minimax;
pub mod queens;
pub mod tictactoe;
pub mod tsp;

pub use hanoi::{check_disks, frame_stewart, hanoi_iterative, hanoi_recursive, HanoiAlgorithm};
pub use knights_tour::{
    is_valid_tour, BacktrackingSolver, KnightGame, TourAlgorithm, TourStatus, WarnsdorffSolver,
};
pub use mcts::{mcts_move, mcts_move_default, MonteCarloEngine, MoveReason};
pub use minimax::{minimax_move, MinimaxEngine};
pub use queens::{count_solutions, is_complete_solution, solution_key, QueensSolver};
pub use tictactoe::TicTacToeAlgorithm;
pub use tsp::{
    brute_force, compare, genetic, nearest_neighbor, GeneticConfig, GeneticConfigError,
    GeneticSolver, TimedTour, TspAlgorithm, TspComparison,
};
