//! 井字棋 Minimax 搜索
//!
//! 评分固定以 O 为正方向：O 胜 +10，X 胜 -10，和棋或到达深度限制为 0。
//! 深度限制之外不做评估，浅层搜索看不到更远的威胁属于预期行为。

use protocol::{CellMove, Player, TicTacToeBoard, DEFAULT_MINIMAX_DEPTH, O_WIN_SCORE, X_WIN_SCORE};
use tracing::debug;

/// Minimax 引擎
pub struct MinimaxEngine {
    depth: u8,
    nodes_searched: u64,
}

impl MinimaxEngine {
    /// 创建指定深度（层数）的引擎
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            nodes_searched: 0,
        }
    }

    /// 搜索最佳落子，棋盘已满时返回 None
    ///
    /// O 取最大值、X 取最小值；分数相同时取枚举顺序中第一个。
    pub fn best_move(&mut self, board: &TicTacToeBoard, player: Player) -> Option<CellMove> {
        self.nodes_searched = 0;

        let mut best: Option<(CellMove, i32)> = None;
        for mv in board.available_moves() {
            let child = board.with_move(mv, player);
            let score = self.minimax(&child, player.opponent(), self.depth.saturating_sub(1));

            let better = match best {
                None => true,
                Some((_, best_score)) => match player {
                    Player::O => score > best_score,
                    Player::X => score < best_score,
                },
            };
            if better {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = best {
            debug!(
                "Minimax {} 深度 {}: 选择 {} 分数 {} (节点 {})",
                player, self.depth, mv, score, self.nodes_searched
            );
        }
        best.map(|(mv, _)| mv)
    }

    fn minimax(&mut self, board: &TicTacToeBoard, to_move: Player, depth: u8) -> i32 {
        self.nodes_searched += 1;

        match board.winner() {
            Some(Player::O) => return O_WIN_SCORE,
            Some(Player::X) => return X_WIN_SCORE,
            None => {}
        }

        let moves = board.available_moves();
        if depth == 0 || moves.is_empty() {
            return 0;
        }

        let scores = moves.into_iter().map(|mv| {
            let child = board.with_move(mv, to_move);
            self.minimax(&child, to_move.opponent(), depth - 1)
        });
        let best = match to_move {
            Player::O => scores.max(),
            Player::X => scores.min(),
        };
        best.unwrap_or(0)
    }

    /// 上次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMAX_DEPTH)
    }
}

/// 便捷入口：按给定深度搜索一步
pub fn minimax_move(board: &TicTacToeBoard, player: Player, depth: u8) -> Option<CellMove> {
    MinimaxEngine::new(depth).best_move(board, player)
}
