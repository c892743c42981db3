//! 玩家会话
//!
//! 玩家名显式保存在会话里，由会话组装各游戏的成绩记录

use std::time::Instant;

use protocol::{
    GameOutcome, GameResult, HanoiError, HanoiSubmission, KnightTourResult, QueensSolutionEntry,
    Square, TicTacToeResult, Towers, TspResultRecord,
};
use puzzle_ai::{
    check_disks, is_complete_solution, solution_key, HanoiAlgorithm, TicTacToeAlgorithm,
    TimedTour,
};
use tracing::{debug, info};

use crate::settings::PortalSettings;
use crate::tictactoe::HUMAN;

/// 玩家会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    player_name: String,
}

impl Session {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
        }
    }

    /// 使用设置中的默认玩家名
    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self::new(settings.player_name.clone())
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// 八皇后成绩，摆放不是完整解时返回 None
    pub fn queens_entry(&self, queens: &[Square], elapsed_secs: f64) -> Option<QueensSolutionEntry> {
        if !is_complete_solution(queens) {
            debug!("八皇后摆放不完整或冲突，不生成成绩");
            return None;
        }
        let key = solution_key(queens);
        info!("{} 找到八皇后解 {}", self.player_name, key);
        Some(QueensSolutionEntry::new(
            key,
            self.player_name.clone(),
            elapsed_secs,
            queens.to_vec(),
        ))
    }

    /// 骑士巡游成绩
    pub fn knight_result(&self, path: &[Square]) -> KnightTourResult {
        KnightTourResult::new(self.player_name.clone(), path)
    }

    /// 汉诺塔提交
    ///
    /// 重放玩家的走法序列；非法走法返回错误，尚未完成返回 None。
    /// 完成时记录的用时是对应算法生成完整解的耗时。
    pub fn hanoi_submission(
        &self,
        algorithm: HanoiAlgorithm,
        num_disks: u32,
        sequence: &str,
    ) -> Result<Option<HanoiSubmission>, HanoiError> {
        check_disks(num_disks)?;
        let mut towers = Towers::new(num_disks, algorithm.pegs());
        let applied = towers.replay(sequence)?;
        if !towers.is_solved(algorithm.destination()) {
            debug!("汉诺塔尚未完成: 已执行 {} 步", applied);
            return Ok(None);
        }

        let start = Instant::now();
        let solution = algorithm.solve(num_disks)?;
        let time_taken_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "{} 完成汉诺塔 {} ({} 盘, {} 步, 算法 {} 步)",
            self.player_name,
            algorithm.game_type(),
            num_disks,
            applied,
            solution.len()
        );

        let move_sequence: Vec<String> = sequence
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Some(HanoiSubmission {
            user_name: self.player_name.clone(),
            game_type: algorithm.game_type().to_string(),
            num_disks,
            moves_submitted: move_sequence.len(),
            move_sequence,
            time_taken_ms,
        }))
    }

    /// 井字棋成绩，玩家执 X；对局未结束时返回 None
    pub fn tictactoe_result(
        &self,
        algorithm: TicTacToeAlgorithm,
        result: &GameResult,
        move_times: &[f64],
    ) -> Option<TicTacToeResult> {
        let outcome = GameOutcome::for_player(result, HUMAN)?;
        info!("{} 井字棋对 {}: {:?}", self.player_name, algorithm.name(), outcome);
        Some(TicTacToeResult::new(
            self.player_name.clone(),
            algorithm.name(),
            outcome,
            move_times.to_vec(),
        ))
    }

    /// 旅行商成绩
    pub fn tsp_record(&self, home: usize, cities: &[usize], timed: TimedTour) -> TspResultRecord {
        TspResultRecord::new(
            self.player_name.clone(),
            home,
            cities.to_vec(),
            timed.algorithm.display_name(),
            timed.tour,
            timed.time_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::TicTacToeMatch;
    use protocol::hanoi::render_moves;
    use protocol::{DistanceMatrix, Player, Tour, MAX_DISKS};
    use puzzle_ai::queens::placement_squares;
    use puzzle_ai::{compare, GeneticConfig, TspAlgorithm};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_queens_entry() {
        let session = Session::new("Ada");
        let queens = placement_squares(&[0, 4, 7, 5, 2, 6, 1, 3]);
        let entry = session.queens_entry(&queens, 12.5).unwrap();
        assert_eq!(entry.player, "Ada");
        assert_eq!(entry.key, "0016243741536572");
        assert_eq!(entry.time, "12.50s");

        assert!(session.queens_entry(&queens[..7], 1.0).is_none());
    }

    #[test]
    fn test_knight_result_uses_session_name() {
        let session = Session::new("Lin");
        let path = [Square::new_unchecked(7, 0), Square::new_unchecked(5, 1)];
        let result = session.knight_result(&path);
        assert_eq!(result.name, "Lin");
        assert_eq!(result.moves, vec!["a1", "b3"]);
    }

    #[test]
    fn test_hanoi_submission_completed() {
        let session = Session::new("Ada");
        let sequence = render_moves(&HanoiAlgorithm::Recursive.solve(3).unwrap()).join(", ");
        let submission = session
            .hanoi_submission(HanoiAlgorithm::Recursive, 3, &sequence)
            .unwrap()
            .unwrap();
        assert_eq!(submission.user_name, "Ada");
        assert_eq!(submission.game_type, "recursive");
        assert_eq!(submission.num_disks, 3);
        assert_eq!(submission.moves_submitted, 7);
        assert_eq!(submission.move_sequence[0], "A->C");
        assert!(submission.time_taken_ms >= 0.0);
    }

    #[test]
    fn test_hanoi_submission_incomplete_or_illegal() {
        let session = Session::new("Ada");
        assert_eq!(
            session.hanoi_submission(HanoiAlgorithm::Iterative, 3, "A->C, A->B"),
            Ok(None)
        );
        assert!(matches!(
            session.hanoi_submission(HanoiAlgorithm::Iterative, 3, "A->B, A->B"),
            Err(HanoiError::LargerOnSmaller { disk: 2, top: 1, .. })
        ));
    }

    #[test]
    fn test_hanoi_submission_rejects_too_many_disks() {
        let session = Session::new("Ada");
        assert_eq!(
            session.hanoi_submission(HanoiAlgorithm::Recursive, MAX_DISKS + 1, "A->C"),
            Err(HanoiError::TooManyDisks {
                count: MAX_DISKS + 1,
                max: MAX_DISKS
            })
        );
        assert!(session
            .hanoi_submission(HanoiAlgorithm::Iterative, 64, "")
            .is_err());
    }

    #[test]
    fn test_hanoi_submission_four_pegs() {
        let session = Session::new("Ada");
        let sequence = render_moves(&HanoiAlgorithm::FrameStewart.solve(4).unwrap()).join(",");
        let submission = session
            .hanoi_submission(HanoiAlgorithm::FrameStewart, 4, &sequence)
            .unwrap()
            .unwrap();
        assert_eq!(submission.game_type, "frameStewart");
        assert_eq!(submission.moves_submitted, 9);
    }

    #[test]
    fn test_tictactoe_result() {
        let session = Session::new("Ada");
        let o_wins = GameResult {
            winner: Some(Player::O),
            draw: false,
        };
        let result = session
            .tictactoe_result(TicTacToeAlgorithm::Minimax, &o_wins, &[0.5, 0.75])
            .unwrap();
        assert_eq!(result.player_name, "Ada");
        assert_eq!(result.algorithm, "minimax");
        assert_eq!(result.result, GameOutcome::Lose);
        assert_eq!(result.move_times, vec![0.5, 0.75]);

        let drawn = GameResult {
            winner: None,
            draw: true,
        };
        let result = session
            .tictactoe_result(TicTacToeAlgorithm::Mcts, &drawn, &[])
            .unwrap();
        assert_eq!(result.result, GameOutcome::Draw);
        assert_eq!(result.algorithm, "mcts");
    }

    #[test]
    fn test_tictactoe_result_after_match() {
        let session = Session::new("Ada");
        let mut game = TicTacToeMatch::new(TicTacToeAlgorithm::Minimax, 2, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(session
            .tictactoe_result(game.algorithm(), &game.result(), game.move_times())
            .is_none());

        while !game.result().is_over() {
            let mv = game.board().available_moves()[0];
            game.play(mv, &mut rng).unwrap();
        }
        let result = session
            .tictactoe_result(game.algorithm(), &game.result(), game.move_times())
            .unwrap();
        assert_eq!(result.move_times.len(), game.board().count(Player::O));
    }

    #[test]
    fn test_tsp_record() {
        let session = Session::new("Ada");
        let timed = TimedTour {
            algorithm: TspAlgorithm::BruteForce,
            tour: Tour {
                route: vec![2, 3, 1],
                distance: 21,
            },
            time_ms: 0.8,
        };
        let record = session.tsp_record(0, &[1, 2, 3], timed);
        assert_eq!(record.player_name, "Ada");
        assert_eq!(record.algorithm, "Brute Force");
        assert_eq!(record.distance, 21);
        assert_eq!(record.selected_cities, vec![1, 2, 3]);
        assert_eq!(record.time_ms, 0.8);
    }

    #[test]
    fn test_tsp_record_from_comparison() {
        let session = Session::new("Ada");
        let matrix = DistanceMatrix::sri_lanka();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let comparison = compare(&matrix, 0, &[1, 2, 3, 4], &GeneticConfig::default(), &mut rng);
        let shortest = comparison.shortest().unwrap().clone();
        let record = session.tsp_record(0, &[1, 2, 3, 4], shortest.clone());
        assert_eq!(record.algorithm, shortest.algorithm.display_name());
        assert_eq!(record.distance, shortest.tour.distance);
        assert_eq!(record.time_ms, shortest.time_ms);
    }
}
