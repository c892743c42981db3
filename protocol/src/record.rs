//! 成绩记录格式
//!
//! 由求解结果组装，交给外部的存储或网络提交方使用，本库不负责持久化。
//! 字段名使用 camelCase，与各游戏外壳既有的 JSON 结构一致。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::square::Square;
use crate::tictactoe::{GameResult, Player};
use crate::tsp::Tour;

/// 八皇后满分（得分 = 满分 - 用时秒数）
pub const QUEENS_FULL_SCORE: f64 = 100.0;

/// 八皇后已提交的解
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueensSolutionEntry {
    /// 规范化后的解标识
    pub key: String,
    /// 玩家名
    pub player: String,
    /// 用时（如 "12.34s"）
    pub time: String,
    /// 得分
    pub score: f64,
    /// 皇后位置（按玩家放置顺序）
    pub positions: Vec<Square>,
}

impl QueensSolutionEntry {
    /// 创建记录，得分由用时换算
    pub fn new(key: String, player: String, elapsed_secs: f64, positions: Vec<Square>) -> Self {
        let rounded = (elapsed_secs * 100.0).round() / 100.0;
        Self {
            key,
            player,
            time: format!("{:.2}s", elapsed_secs),
            score: QUEENS_FULL_SCORE - rounded,
            positions,
        }
    }
}

/// 骑士巡游成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnightTourResult {
    /// 玩家名
    pub name: String,
    /// 走过的格子（记谱）
    pub moves: Vec<String>,
    /// 完成时间
    pub date: DateTime<Utc>,
}

impl KnightTourResult {
    /// 由格子序列创建
    pub fn new(name: String, path: &[Square]) -> Self {
        Self {
            name,
            moves: path.iter().map(Square::to_notation).collect(),
            date: Utc::now(),
        }
    }
}

/// 汉诺塔对局提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HanoiSubmission {
    /// 玩家名
    pub user_name: String,
    /// 算法类型（recursive / iterative / frameStewart）
    pub game_type: String,
    /// 盘子数
    pub num_disks: u32,
    /// 玩家提交的步数
    pub moves_submitted: usize,
    /// 玩家提交的走法序列
    pub move_sequence: Vec<String>,
    /// 生成最优解的算法耗时（毫秒）
    pub time_taken_ms: f64,
}

/// 井字棋对局结果（玩家视角）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Win,
    Lose,
    Draw,
}

impl GameOutcome {
    /// `player` 视角的结果，对局未结束时返回 None
    pub fn for_player(result: &GameResult, player: Player) -> Option<Self> {
        match result.winner {
            Some(winner) if winner == player => Some(GameOutcome::Win),
            Some(_) => Some(GameOutcome::Lose),
            None if result.draw => Some(GameOutcome::Draw),
            None => None,
        }
    }
}

/// 井字棋成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicTacToeResult {
    /// 玩家名
    pub player_name: String,
    /// 电脑使用的算法（minimax / mcts）
    pub algorithm: String,
    /// 玩家视角的结果
    pub result: GameOutcome,
    /// 电脑每步的思考用时（秒）
    pub move_times: Vec<f64>,
    /// 对局日期
    pub date: NaiveDate,
}

impl TicTacToeResult {
    pub fn new(
        player_name: String,
        algorithm: &str,
        result: GameOutcome,
        move_times: Vec<f64>,
    ) -> Self {
        Self {
            player_name,
            algorithm: algorithm.to_string(),
            result,
            move_times,
            date: Utc::now().date_naive(),
        }
    }
}

/// 旅行商成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TspResultRecord {
    /// 玩家名
    pub player_name: String,
    /// 起点城市
    pub home_city: usize,
    /// 选择的城市
    pub selected_cities: Vec<usize>,
    /// 算法名称
    pub algorithm: String,
    /// 求得的路线
    pub route: Vec<usize>,
    /// 总距离
    pub distance: u64,
    /// 记录时间
    pub date: DateTime<Utc>,
    /// 求解用时（毫秒）
    pub time_ms: f64,
}

impl TspResultRecord {
    /// 由求解结果创建
    pub fn new(
        player_name: String,
        home_city: usize,
        selected_cities: Vec<usize>,
        algorithm: &str,
        tour: Tour,
        time_ms: f64,
    ) -> Self {
        Self {
            player_name,
            home_city,
            selected_cities,
            algorithm: algorithm.to_string(),
            route: tour.route,
            distance: tour.distance,
            date: Utc::now(),
            time_ms,
        }
    }
}

/// 序列化为 JSON 字符串
pub fn to_json<T: Serialize>(record: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// 从 JSON 字符串解析
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queens_entry_score() {
        let entry = QueensSolutionEntry::new(
            "0416...".to_string(),
            "Alice".to_string(),
            12.5,
            vec![Square::new_unchecked(0, 0)],
        );
        assert_eq!(entry.time, "12.50s");
        assert!((entry.score - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_knight_result_uses_notation() {
        let path = [Square::new_unchecked(7, 0), Square::new_unchecked(5, 1)];
        let result = KnightTourResult::new("Bob".to_string(), &path);
        assert_eq!(result.moves, vec!["a1".to_string(), "b3".to_string()]);
    }

    #[test]
    fn test_hanoi_submission_json_field_names() {
        let submission = HanoiSubmission {
            user_name: "Carol".to_string(),
            game_type: "recursive".to_string(),
            num_disks: 3,
            moves_submitted: 7,
            move_sequence: vec!["A->C".to_string()],
            time_taken_ms: 0.25,
        };
        let json = to_json(&submission).unwrap();
        assert!(json.contains("\"userName\""));
        assert!(json.contains("\"timeTakenMs\""));

        let parsed: HanoiSubmission = from_json(&json).unwrap();
        assert_eq!(parsed, submission);
    }

    #[test]
    fn test_tsp_record_from_tour() {
        let tour = Tour {
            route: vec![2, 3, 1],
            distance: 21,
        };
        let record =
            TspResultRecord::new("Dan".to_string(), 0, vec![1, 2, 3], "Brute Force", tour, 1.5);
        assert_eq!(record.route, vec![2, 3, 1]);
        assert_eq!(record.distance, 21);
        let json = to_json(&record).unwrap();
        assert!(json.contains("\"selectedCities\""));
        assert!(json.contains("\"timeMs\": 1.5"));
    }

    #[test]
    fn test_game_outcome_for_player() {
        let x_wins = GameResult {
            winner: Some(Player::X),
            draw: false,
        };
        let drawn = GameResult {
            winner: None,
            draw: true,
        };
        let ongoing = GameResult {
            winner: None,
            draw: false,
        };
        assert_eq!(GameOutcome::for_player(&x_wins, Player::X), Some(GameOutcome::Win));
        assert_eq!(GameOutcome::for_player(&x_wins, Player::O), Some(GameOutcome::Lose));
        assert_eq!(GameOutcome::for_player(&drawn, Player::X), Some(GameOutcome::Draw));
        assert_eq!(GameOutcome::for_player(&ongoing, Player::X), None);
    }

    #[test]
    fn test_tictactoe_result_json() {
        let mut result =
            TicTacToeResult::new("Eve".to_string(), "mcts", GameOutcome::Lose, vec![0.5, 0.25]);
        result.date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let json = to_json(&result).unwrap();
        assert!(json.contains("\"playerName\": \"Eve\""));
        assert!(json.contains("\"result\": \"Lose\""));
        assert!(json.contains("\"moveTimes\""));
        assert!(json.contains("\"date\": \"2024-03-09\""));

        let parsed: TicTacToeResult = from_json(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
