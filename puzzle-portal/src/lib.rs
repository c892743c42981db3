//! 益智游戏门户
//!
//! 包含:
//! - 门户设置
//! - 玩家会话与成绩记录组装
//! - 玩家计时
//! - 井字棋人机对局
//! - 后台求解

pub mod runner;
pub mod session;
pub mod settings;
pub mod tictactoe;
pub mod timer;

pub use runner::{SolveError, SolveHandle, SolveRunner};
pub use session::Session;
pub use settings::{LogLevel, PortalSettings};
pub use tictactoe::TicTacToeMatch;
pub use timer::PlayTimer;
