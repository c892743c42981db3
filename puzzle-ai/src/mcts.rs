//! 井字棋随机模拟选步
//!
//! 按优先级分三层：
//! 1. 一步即胜的格子
//! 2. 对手下一步即胜的格子（堵住）
//! 3. 对每个候选格子做若干局随机对弈，取胜率最高者
//!
//! 只是扁平的随机模拟，不建搜索树。

use protocol::{CellMove, Player, TicTacToeBoard, DEFAULT_SIMULATIONS};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// 选步所在的层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReason {
    Win,
    Block,
    Simulation,
}

/// 随机模拟引擎
pub struct MonteCarloEngine<R: Rng> {
    simulations: u32,
    rng: R,
}

impl<R: Rng> MonteCarloEngine<R> {
    /// 每个候选格子模拟 `simulations` 局
    pub fn new(simulations: u32, rng: R) -> Self {
        Self { simulations, rng }
    }

    /// 选择落子，棋盘已满时返回 None
    pub fn best_move(&mut self, board: &TicTacToeBoard, player: Player) -> Option<CellMove> {
        self.choose(board, player).map(|(mv, _)| mv)
    }

    /// 选择落子并给出层级
    pub fn choose(
        &mut self,
        board: &TicTacToeBoard,
        player: Player,
    ) -> Option<(CellMove, MoveReason)> {
        let moves = board.available_moves();
        if moves.is_empty() {
            return None;
        }

        if let Some(mv) = winning_move(board, &moves, player) {
            debug!("MCTS {}: {} 一步取胜", player, mv);
            return Some((mv, MoveReason::Win));
        }

        if let Some(mv) = blocking_move(board, &moves, player) {
            debug!("MCTS {}: {} 堵住对手", player, mv);
            return Some((mv, MoveReason::Block));
        }

        // 胜局计数从 -1 起，保证第一个候选一定被选中
        let mut best = moves[0];
        let mut best_wins: i64 = -1;
        for &mv in &moves {
            let child = board.with_move(mv, player);
            let wins = (0..self.simulations)
                .filter(|_| self.playout(&child, player.opponent()) == Some(player))
                .count() as i64;
            if wins > best_wins {
                best_wins = wins;
                best = mv;
            }
        }

        debug!(
            "MCTS {}: {} 胜局 {}/{}",
            player, best, best_wins, self.simulations
        );
        Some((best, MoveReason::Simulation))
    }

    /// 从 `to_move` 开始双方随机落子直到终局，返回胜方
    fn playout(&mut self, board: &TicTacToeBoard, mut to_move: Player) -> Option<Player> {
        let mut board = board.clone();
        loop {
            if let Some(winner) = board.winner() {
                return Some(winner);
            }
            let moves = board.available_moves();
            let mv = *moves.choose(&mut self.rng)?;
            board = board.with_move(mv, to_move);
            to_move = to_move.opponent();
        }
    }
}

/// `player` 落下后立即获胜的第一个格子
fn winning_move(board: &TicTacToeBoard, moves: &[CellMove], player: Player) -> Option<CellMove> {
    moves
        .iter()
        .copied()
        .find(|&mv| board.with_move(mv, player).winner() == Some(player))
}

/// 对手的必胜格子
///
/// 先假设自己落下某个候选，再看对手能否一步获胜；返回的是对手那一步的格子。
fn blocking_move(board: &TicTacToeBoard, moves: &[CellMove], player: Player) -> Option<CellMove> {
    let opponent = player.opponent();
    moves.iter().find_map(|&mine| {
        let after = board.with_move(mine, player);
        let replies = after.available_moves();
        winning_move(&after, &replies, opponent)
    })
}

/// 便捷入口：使用给定随机源
pub fn mcts_move<R: Rng>(
    board: &TicTacToeBoard,
    player: Player,
    simulations: u32,
    rng: R,
) -> Option<CellMove> {
    MonteCarloEngine::new(simulations, rng).best_move(board, player)
}

/// 便捷入口：默认模拟次数，线程随机源
pub fn mcts_move_default(board: &TicTacToeBoard, player: Player) -> Option<CellMove> {
    mcts_move(board, player, DEFAULT_SIMULATIONS, rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board(rows: [&str; 5]) -> TicTacToeBoard {
        TicTacToeBoard::from_rows(rows).unwrap()
    }

    fn engine(seed: u64) -> MonteCarloEngine<ChaCha8Rng> {
        MonteCarloEngine::new(DEFAULT_SIMULATIONS, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_takes_immediate_win() {
        let b = board(["OOOO.", ".....", ".....", ".....", "....."]);
        let choice = engine(1).choose(&b, Player::O);
        assert_eq!(choice, Some((CellMove::new(0, 4), MoveReason::Win)));
    }

    #[test]
    fn test_blocks_opponent() {
        let b = board(["XXXX.", ".....", ".....", ".....", "....."]);
        let choice = engine(2).choose(&b, Player::O);
        assert_eq!(choice, Some((CellMove::new(0, 4), MoveReason::Block)));
    }

    #[test]
    fn test_win_preferred_over_block() {
        let b = board(["XXXX.", "OOOO.", ".....", ".....", "....."]);
        let choice = engine(3).choose(&b, Player::O);
        assert_eq!(choice, Some((CellMove::new(1, 4), MoveReason::Win)));
    }

    #[test]
    fn test_simulation_returns_legal_move() {
        let b = board(["X....", ".O...", ".....", ".....", "....."]);
        for seed in 0..5 {
            let (mv, reason) = engine(seed).choose(&b, Player::X).unwrap();
            assert_eq!(reason, MoveReason::Simulation);
            assert!(b.available_moves().contains(&mv));
        }
    }

    #[test]
    fn test_same_seed_same_move() {
        let b = TicTacToeBoard::empty();
        let first = mcts_move(&b, Player::O, 10, ChaCha8Rng::seed_from_u64(7));
        let second = mcts_move(&b, Player::O, 10, ChaCha8Rng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_simulations_picks_first_candidate() {
        let b = board(["X....", ".....", ".....", ".....", "....."]);
        let mv = mcts_move(&b, Player::O, 0, ChaCha8Rng::seed_from_u64(0));
        assert_eq!(mv, Some(CellMove::new(0, 1)));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let b = board(["XOXOX", "XOXOX", "OXOXO", "XOXOX", "XOXOX"]);
        assert_eq!(mcts_move_default(&b, Player::O), None);
    }
}
