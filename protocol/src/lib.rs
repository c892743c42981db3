//! 益智游戏门户共享数据模型
//!
//! 包含:
//! - 8x8 棋盘格子与记谱（八皇后、骑士巡游）
//! - 5x5 井字棋棋盘与对局结果
//! - 汉诺塔柱状态、走法校验与走法序列重放
//! - 旅行商距离矩阵与路线
//! - 成绩记录格式 (JSON)

mod constants;
mod error;
pub mod hanoi;
mod record;
mod square;
pub mod tictactoe;
pub mod tsp;

pub use constants::*;
pub use error::{HanoiError, NotationError, TicTacToeError, TourMoveError, TspInputError};
pub use hanoi::{HanoiMove, Peg, Towers};
pub use record::{
    from_json, to_json, GameOutcome, HanoiSubmission, KnightTourResult, QueensSolutionEntry,
    TicTacToeResult, TspResultRecord, QUEENS_FULL_SCORE,
};
pub use square::{is_knight_move, valid_knight_moves, Square, KNIGHT_OFFSETS};
pub use tictactoe::{CellMove, GameResult, Player, TicTacToeBoard};
pub use tsp::{tour_distance, validate_cities, DistanceMatrix, Tour, SRI_LANKA_CITIES};
