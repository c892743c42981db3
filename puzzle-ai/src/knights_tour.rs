//! 骑士巡游
//!
//! 两种求解器，签名相同：从起点出发返回 64 个格子的路径，失败返回 None。
//! - 回溯：按固定偏移顺序深度优先搜索，穷举，最坏情况指数级
//! - Warnsdorff：贪心选择后继度数最小的格子，可能在存在解时失败

use protocol::{valid_knight_moves, Square, TourMoveError, TOUR_LENGTH};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 求解算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TourAlgorithm {
    /// 回溯
    Backtracking,
    /// Warnsdorff 启发式
    Warnsdorff,
}

impl TourAlgorithm {
    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TourAlgorithm::Backtracking => "Backtracking",
            TourAlgorithm::Warnsdorff => "Warnsdorff's Heuristic",
        }
    }

    /// 使用该算法求解（回溯不设步数上限）
    pub fn solve(&self, start: Square) -> Option<Vec<Square>> {
        match self {
            TourAlgorithm::Backtracking => BacktrackingSolver::new().solve(start),
            TourAlgorithm::Warnsdorff => WarnsdorffSolver::solve(start),
        }
    }
}

/// 访问记录：每格保存第几步到达，-1 表示未访问
struct VisitBoard {
    cells: [i8; TOUR_LENGTH],
}

impl VisitBoard {
    fn new() -> Self {
        Self {
            cells: [-1; TOUR_LENGTH],
        }
    }

    fn is_free(&self, sq: Square) -> bool {
        self.cells[sq.to_index()] < 0
    }

    fn mark(&mut self, sq: Square, step: usize) {
        self.cells[sq.to_index()] = step as i8;
    }

    fn unmark(&mut self, sq: Square) {
        self.cells[sq.to_index()] = -1;
    }

    /// 从 sq 出发尚未访问的后继数量
    fn degree(&self, sq: Square) -> usize {
        sq.knight_moves().filter(|&next| self.is_free(next)).count()
    }
}

/// 回溯求解器
#[derive(Debug, Default)]
pub struct BacktrackingSolver {
    /// 最多尝试的走步数，None 表示不限
    max_steps: Option<u64>,
    steps: u64,
    aborted: bool,
}

impl BacktrackingSolver {
    /// 不限步数的求解器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置尝试步数上限，超出后放弃搜索并返回 None
    pub fn with_step_limit(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..Self::default()
        }
    }

    /// 求解
    pub fn solve(&mut self, start: Square) -> Option<Vec<Square>> {
        self.steps = 0;
        self.aborted = false;
        if !start.is_valid() {
            return None;
        }

        let mut board = VisitBoard::new();
        let mut path = Vec::with_capacity(TOUR_LENGTH);
        board.mark(start, 0);
        path.push(start);

        let found = self.extend(start, 1, &mut board, &mut path);
        debug!(
            "回溯巡游 {}: 尝试 {} 步, 结果 {}",
            start.to_notation(),
            self.steps,
            if found { "成功" } else if self.aborted { "超出步数上限" } else { "无解" }
        );
        found.then_some(path)
    }

    /// 上次搜索尝试的走步数
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// 上次搜索是否因步数上限而中止
    pub fn was_aborted(&self) -> bool {
        self.aborted
    }

    fn extend(
        &mut self,
        current: Square,
        move_count: usize,
        board: &mut VisitBoard,
        path: &mut Vec<Square>,
    ) -> bool {
        if move_count == TOUR_LENGTH {
            return true;
        }

        for next in current.knight_moves() {
            if !board.is_free(next) {
                continue;
            }

            self.steps += 1;
            if self.max_steps.is_some_and(|max| self.steps > max) {
                self.aborted = true;
                return false;
            }

            board.mark(next, move_count);
            path.push(next);

            if self.extend(next, move_count + 1, board, path) {
                return true;
            }
            if self.aborted {
                return false;
            }

            // 回溯
            board.unmark(next);
            path.pop();
        }

        false
    }
}

/// Warnsdorff 启发式求解器
///
/// 每一步在合法后继中选择度数严格最小的格子，度数相同时取枚举顺序靠前者。
/// 贪心不保证找到解，死路时返回 None 属于预期行为。
pub struct WarnsdorffSolver;

impl WarnsdorffSolver {
    /// 求解
    pub fn solve(start: Square) -> Option<Vec<Square>> {
        if !start.is_valid() {
            return None;
        }

        let mut board = VisitBoard::new();
        let mut path = Vec::with_capacity(TOUR_LENGTH);
        board.mark(start, 0);
        path.push(start);

        let mut current = start;
        for move_count in 1..TOUR_LENGTH {
            let mut best: Option<(Square, usize)> = None;
            for next in current.knight_moves().filter(|&sq| board.is_free(sq)) {
                let degree = board.degree(next);
                if best.map_or(true, |(_, d)| degree < d) {
                    best = Some((next, degree));
                }
            }

            let Some((next, _)) = best else {
                debug!("Warnsdorff 巡游 {} 在第 {} 步进入死路", start.to_notation(), move_count);
                return None;
            };
            board.mark(next, move_count);
            path.push(next);
            current = next;
        }

        Some(path)
    }
}

/// 校验完整巡游：64 个互不相同的格子，相邻两格为马走法
pub fn is_valid_tour(path: &[Square]) -> bool {
    if path.len() != TOUR_LENGTH || !path.iter().all(Square::is_valid) {
        return false;
    }
    let mut seen = [false; TOUR_LENGTH];
    for sq in path {
        if std::mem::replace(&mut seen[sq.to_index()], true) {
            return false;
        }
    }
    path.windows(2).all(|pair| pair[0].is_knight_step(pair[1]))
}

/// 玩家巡游状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TourStatus {
    /// 进行中
    Playing,
    /// 走遍 64 格
    Won,
    /// 无路可走
    Lost,
    /// 放弃（和局）
    Draw,
}

/// 玩家手动巡游
#[derive(Debug, Clone)]
pub struct KnightGame {
    visited: Vec<Square>,
    status: TourStatus,
}

impl KnightGame {
    /// 从起点开始，起点不在棋盘内时返回 None
    pub fn new(start: Square) -> Option<Self> {
        if !start.is_valid() {
            debug!("巡游起点不在棋盘内: {}", start);
            return None;
        }
        Some(Self {
            visited: vec![start],
            status: TourStatus::Playing,
        })
    }

    /// 走一步；非法走法返回错误且状态不变
    pub fn play(&mut self, to: Square) -> Result<TourStatus, TourMoveError> {
        if self.status != TourStatus::Playing {
            return Err(TourMoveError::GameOver);
        }
        let from = self.current();
        if !to.is_valid() || !from.is_knight_step(to) {
            return Err(TourMoveError::NotKnightMove);
        }
        if self.visited.contains(&to) {
            return Err(TourMoveError::AlreadyVisited);
        }

        self.visited.push(to);
        self.status = if self.visited.len() == TOUR_LENGTH {
            TourStatus::Won
        } else if valid_knight_moves(to, &self.visited).is_empty() {
            TourStatus::Lost
        } else {
            TourStatus::Playing
        };
        Ok(self.status)
    }

    /// 放弃
    pub fn give_up(&mut self) {
        if self.status == TourStatus::Playing {
            self.status = TourStatus::Draw;
        }
    }

    /// 当前所在格子
    pub fn current(&self) -> Square {
        // visited 至少包含起点
        self.visited[self.visited.len() - 1]
    }

    /// 已访问格子（按顺序）
    pub fn visited(&self) -> &[Square] {
        &self.visited
    }

    /// 当前状态
    pub fn status(&self) -> TourStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(notation: &str) -> Square {
        Square::from_notation(notation).unwrap()
    }

    #[test]
    fn test_backtracking_from_corner() {
        let mut solver = BacktrackingSolver::new();
        let path = solver.solve(Square::new_unchecked(0, 0)).expect("tour from (0,0)");
        assert_eq!(path.len(), 64);
        assert_eq!(path[0], Square::new_unchecked(0, 0));
        assert!(is_valid_tour(&path));
        assert!(!solver.was_aborted());
        assert!(solver.steps_taken() >= 63);
    }

    #[test]
    fn test_warnsdorff_from_corner() {
        let path = WarnsdorffSolver::solve(Square::new_unchecked(0, 0)).expect("tour from (0,0)");
        assert_eq!(path.len(), 64);
        assert!(is_valid_tour(&path));
    }

    #[test]
    fn test_warnsdorff_results_are_valid_when_found() {
        for index in 0..64 {
            let start = Square::from_index(index).unwrap();
            if let Some(path) = WarnsdorffSolver::solve(start) {
                assert_eq!(path[0], start);
                assert!(is_valid_tour(&path), "invalid tour from {}", start);
            }
        }
    }

    #[test]
    fn test_step_limit_aborts() {
        let mut solver = BacktrackingSolver::with_step_limit(10);
        assert!(solver.solve(Square::new_unchecked(0, 0)).is_none());
        assert!(solver.was_aborted());
        assert_eq!(solver.steps_taken(), 11);
    }

    #[test]
    fn test_invalid_start() {
        assert!(BacktrackingSolver::new().solve(Square::new_unchecked(8, 0)).is_none());
        assert!(WarnsdorffSolver::solve(Square::new_unchecked(0, 9)).is_none());
    }

    #[test]
    fn test_algorithm_dispatch() {
        let path = TourAlgorithm::Warnsdorff.solve(Square::new_unchecked(0, 0)).unwrap();
        assert!(is_valid_tour(&path));
        assert_eq!(TourAlgorithm::Backtracking.display_name(), "Backtracking");
    }

    #[test]
    fn test_is_valid_tour_rejects_bad_paths() {
        let path = WarnsdorffSolver::solve(Square::new_unchecked(0, 0)).unwrap();

        assert!(!is_valid_tour(&path[..63]));

        let mut repeated = path.clone();
        repeated[63] = repeated[61];
        assert!(!is_valid_tour(&repeated));

        // 两步马走法后回到同色格，不可能再是一步马走法
        let mut swapped = path.clone();
        swapped.swap(1, 2);
        assert!(!is_valid_tour(&swapped));

        let mut reversed = path.clone();
        reversed.reverse();
        assert!(is_valid_tour(&reversed));
    }

    #[test]
    fn test_game_rejects_illegal_moves() {
        let mut game = KnightGame::new(sq("a1")).unwrap();
        assert_eq!(game.play(sq("a2")), Err(TourMoveError::NotKnightMove));
        assert_eq!(game.play(sq("b3")), Ok(TourStatus::Playing));
        assert_eq!(game.play(sq("a1")), Err(TourMoveError::AlreadyVisited));
        assert_eq!(game.visited().len(), 2);
        assert_eq!(game.current(), sq("b3"));
    }

    #[test]
    fn test_game_lost_when_stuck() {
        // 最后到达 a1 时，它仅有的两个后继 b3、c2 都已访问
        let mut game = KnightGame::new(sq("c2")).unwrap();
        for notation in ["b4", "d3", "c1", "b3"] {
            assert_eq!(game.play(sq(notation)), Ok(TourStatus::Playing));
        }
        assert_eq!(game.play(sq("a1")), Ok(TourStatus::Lost));
        assert_eq!(game.status(), TourStatus::Lost);
    }

    #[test]
    fn test_game_completes_with_solver_path() {
        let path = WarnsdorffSolver::solve(Square::new_unchecked(0, 0)).unwrap();
        let mut game = KnightGame::new(path[0]).unwrap();
        let mut last = TourStatus::Playing;
        for &step in &path[1..] {
            last = game.play(step).unwrap();
        }
        assert_eq!(last, TourStatus::Won);
        assert_eq!(game.play(path[1]), Err(TourMoveError::GameOver));
    }

    #[test]
    fn test_game_rejects_off_board_start() {
        assert!(KnightGame::new(Square::new_unchecked(8, 0)).is_none());
        assert!(KnightGame::new(Square::new_unchecked(255, 255)).is_none());
        assert!(KnightGame::new(Square::new_unchecked(7, 7)).is_some());
    }

    #[test]
    fn test_give_up() {
        let mut game = KnightGame::new(sq("d4")).unwrap();
        game.give_up();
        assert_eq!(game.status(), TourStatus::Draw);
        assert_eq!(game.play(sq("e6")), Err(TourMoveError::GameOver));
    }
}
