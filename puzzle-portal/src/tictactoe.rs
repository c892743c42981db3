//! 井字棋人机对局
//!
//! 玩家执 X 先手，电脑执 O 应对。电脑每一步的思考时间单独记录，
//! 对局结束后由会话生成成绩。

use std::time::Instant;

use protocol::{CellMove, GameResult, Player, TicTacToeBoard, TicTacToeError};
use puzzle_ai::TicTacToeAlgorithm;
use rand::Rng;
use tracing::debug;

use crate::settings::PortalSettings;

/// 玩家棋子
pub const HUMAN: Player = Player::X;

/// 电脑棋子
pub const COMPUTER: Player = Player::O;

/// 人机对局
#[derive(Debug, Clone)]
pub struct TicTacToeMatch {
    board: TicTacToeBoard,
    algorithm: TicTacToeAlgorithm,
    depth: u8,
    simulations: u32,
    /// 电脑每步用时（秒）
    move_times: Vec<f64>,
}

impl TicTacToeMatch {
    pub fn new(algorithm: TicTacToeAlgorithm, depth: u8, simulations: u32) -> Self {
        Self {
            board: TicTacToeBoard::empty(),
            algorithm,
            depth,
            simulations,
            move_times: Vec::new(),
        }
    }

    /// 搜索深度和模拟次数取自设置
    pub fn from_settings(algorithm: TicTacToeAlgorithm, settings: &PortalSettings) -> Self {
        Self::new(algorithm, settings.minimax_depth, settings.mcts_simulations)
    }

    /// 玩家落子，对局未结束时电脑随即应对
    ///
    /// 返回电脑的落子；玩家这一步结束了对局时返回 None。
    pub fn play<R: Rng + ?Sized>(
        &mut self,
        mv: CellMove,
        rng: &mut R,
    ) -> Result<Option<CellMove>, TicTacToeError> {
        if self.result().is_over() {
            return Err(TicTacToeError::GameOver);
        }
        self.board.play(mv, HUMAN)?;
        if self.result().is_over() {
            return Ok(None);
        }

        let start = Instant::now();
        let reply = self.algorithm.choose_move(
            &self.board,
            COMPUTER,
            self.depth,
            self.simulations,
            rng,
        );
        let elapsed = start.elapsed().as_secs_f64();

        let Some(reply) = reply else {
            return Ok(None);
        };
        self.board.play(reply, COMPUTER)?;
        self.move_times.push(elapsed);
        debug!("{} 应对 {}，用时 {:.3}s", self.algorithm.name(), reply, elapsed);
        Ok(Some(reply))
    }

    pub fn board(&self) -> &TicTacToeBoard {
        &self.board
    }

    pub fn result(&self) -> GameResult {
        self.board.result()
    }

    pub fn algorithm(&self) -> TicTacToeAlgorithm {
        self.algorithm
    }

    /// 电脑每步用时（秒）
    pub fn move_times(&self) -> &[f64] {
        &self.move_times
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_computer_replies_and_is_timed() {
        let mut game = TicTacToeMatch::new(TicTacToeAlgorithm::Minimax, 1, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let reply = game.play(CellMove::new(2, 2), &mut rng).unwrap().unwrap();
        assert_eq!(game.board().get(2, 2), Some(HUMAN));
        assert_eq!(game.board().get(reply.row, reply.col), Some(COMPUTER));
        assert_eq!(game.move_times().len(), 1);
        assert!(game.move_times()[0] >= 0.0);
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game = TicTacToeMatch::new(TicTacToeAlgorithm::Mcts, 2, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let reply = game.play(CellMove::new(0, 0), &mut rng).unwrap().unwrap();

        assert_eq!(
            game.play(reply, &mut rng),
            Err(TicTacToeError::Occupied {
                row: reply.row,
                col: reply.col
            })
        );
        assert_eq!(
            game.play(CellMove::new(5, 0), &mut rng),
            Err(TicTacToeError::OutOfBounds { row: 5, col: 0 })
        );
        assert_eq!(game.board().count(HUMAN), 1);
        assert_eq!(game.move_times().len(), 1);
    }

    #[test]
    fn test_game_runs_to_completion() {
        let mut game = TicTacToeMatch::new(TicTacToeAlgorithm::Mcts, 2, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        while !game.result().is_over() {
            let mv = game.board().available_moves()[0];
            game.play(mv, &mut rng).unwrap();
        }
        assert_eq!(
            game.play(CellMove::new(0, 0), &mut rng),
            Err(TicTacToeError::GameOver)
        );
        assert_eq!(game.move_times().len(), game.board().count(COMPUTER));
    }
}
