//! 井字棋电脑对手的算法选择

use protocol::{CellMove, Player, TicTacToeBoard};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::mcts::mcts_move;
use crate::minimax::minimax_move;

/// 电脑对手算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TicTacToeAlgorithm {
    Minimax,
    Mcts,
}

impl TicTacToeAlgorithm {
    pub const ALL: [TicTacToeAlgorithm; 2] = [TicTacToeAlgorithm::Minimax, TicTacToeAlgorithm::Mcts];

    /// 成绩记录中的算法名
    pub fn name(&self) -> &'static str {
        match self {
            TicTacToeAlgorithm::Minimax => "minimax",
            TicTacToeAlgorithm::Mcts => "mcts",
        }
    }

    /// 选择落子，棋盘已满时返回 None
    ///
    /// Minimax 使用 `depth`，随机模拟使用 `simulations` 与 `rng`。
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        board: &TicTacToeBoard,
        player: Player,
        depth: u8,
        simulations: u32,
        rng: &mut R,
    ) -> Option<CellMove> {
        match self {
            TicTacToeAlgorithm::Minimax => minimax_move(board, player, depth),
            TicTacToeAlgorithm::Mcts => mcts_move(board, player, simulations, &mut *rng),
        }
    }
}
