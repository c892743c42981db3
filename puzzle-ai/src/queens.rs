//! N 皇后
//!
//! 按列回溯，用三个位集记录已占用的行和两个方向的对角线：
//! - 行位集：第 row 位
//! - 主对角线：row - col + (n - 1)，平移到非负
//! - 副对角线：row + col

use protocol::{Square, CHESS_BOARD_SIZE};

/// 位集支持的最大边长（对角线需要 2n - 1 位）
pub const MAX_QUEENS: usize = 16;

/// N 皇后求解器
pub struct QueensSolver {
    size: usize,
    nodes_searched: u64,
}

impl QueensSolver {
    /// 创建指定边长的求解器，超出位集范围时返回 None
    pub fn new(size: usize) -> Option<Self> {
        if (1..=MAX_QUEENS).contains(&size) {
            Some(Self {
                size,
                nodes_searched: 0,
            })
        } else {
            None
        }
    }

    /// 标准 8x8 棋盘
    pub fn eight() -> Self {
        Self {
            size: CHESS_BOARD_SIZE,
            nodes_searched: 0,
        }
    }

    /// 统计解的数量
    pub fn count(&mut self) -> u64 {
        let mut count = 0;
        self.search(|_| count += 1);
        count
    }

    /// 枚举所有解，每个解为各列皇后所在的行
    pub fn solutions(&mut self) -> Vec<Vec<u8>> {
        let mut solutions = Vec::new();
        self.search(|rows| solutions.push(rows.to_vec()));
        solutions
    }

    /// 上次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    fn search<F: FnMut(&[u8])>(&mut self, mut on_solution: F) {
        self.nodes_searched = 0;
        let mut placement = Vec::with_capacity(self.size);
        self.place(0, 0, 0, 0, &mut placement, &mut on_solution);
    }

    fn place<F: FnMut(&[u8])>(
        &mut self,
        col: usize,
        rows: u32,
        diag1: u32,
        diag2: u32,
        placement: &mut Vec<u8>,
        on_solution: &mut F,
    ) {
        self.nodes_searched += 1;

        if col == self.size {
            on_solution(placement);
            return;
        }

        for row in 0..self.size {
            let r = 1 << row;
            let d1 = 1 << (row + self.size - 1 - col);
            let d2 = 1 << (row + col);
            if rows & r != 0 || diag1 & d1 != 0 || diag2 & d2 != 0 {
                continue;
            }

            placement.push(row as u8);
            self.place(col + 1, rows | r, diag1 | d1, diag2 | d2, placement, on_solution);
            placement.pop();
        }
    }
}

/// 8x8 棋盘的解数量（必为 92）
pub fn count_solutions() -> u64 {
    QueensSolver::eight().count()
}

/// 把一个 8x8 解（各列所在行）转换为格子列表
pub fn placement_squares(rows: &[u8]) -> Vec<Square> {
    rows.iter()
        .enumerate()
        .map(|(col, &row)| Square::new_unchecked(row, col as u8))
        .collect()
}

/// 格子是否被已放置的皇后攻击（同行、同列或同对角线）
pub fn is_attacked(row: u8, col: u8, queens: &[Square]) -> bool {
    queens.iter().any(|q| {
        q.row == row || q.col == col || q.row.abs_diff(row) == q.col.abs_diff(col)
    })
}

/// 是否为完整的八皇后解：8 个合法格子，两两互不攻击
pub fn is_complete_solution(queens: &[Square]) -> bool {
    queens.len() == CHESS_BOARD_SIZE
        && queens.iter().all(Square::is_valid)
        && queens
            .iter()
            .enumerate()
            .all(|(i, q)| !is_attacked(q.row, q.col, &queens[..i]))
}

/// 规范化解标识：按 (行, 列) 排序后拼接 "{行}{列}"
///
/// 同一组位置无论放置顺序如何，得到的标识相同。
pub fn solution_key(queens: &[Square]) -> String {
    let mut sorted = queens.to_vec();
    sorted.sort();
    sorted
        .iter()
        .map(|q| format!("{}{}", q.row, q.col))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_queens_count() {
        assert_eq!(count_solutions(), 92);
    }

    #[test]
    fn test_count_is_deterministic() {
        let first = count_solutions();
        let second = count_solutions();
        assert_eq!(first, second);
    }

    #[test]
    fn test_small_boards() {
        let expected = [(1, 1), (2, 0), (3, 0), (4, 2), (5, 10), (6, 4), (7, 40)];
        for (n, count) in expected {
            let mut solver = QueensSolver::new(n).unwrap();
            assert_eq!(solver.count(), count, "n = {}", n);
        }
    }

    #[test]
    fn test_size_limits() {
        assert!(QueensSolver::new(0).is_none());
        assert!(QueensSolver::new(MAX_QUEENS + 1).is_none());
        assert!(QueensSolver::new(MAX_QUEENS).is_some());
    }

    #[test]
    fn test_enumerated_solutions_are_valid_and_distinct() {
        let mut solver = QueensSolver::eight();
        let solutions = solver.solutions();
        assert_eq!(solutions.len(), 92);
        assert!(solver.nodes_searched() > 92);

        let mut keys: Vec<String> = solutions
            .iter()
            .map(|rows| {
                let squares = placement_squares(rows);
                assert!(is_complete_solution(&squares));
                solution_key(&squares)
            })
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 92);
    }

    #[test]
    fn test_is_attacked() {
        let queens = [Square::new_unchecked(0, 0)];
        assert!(is_attacked(0, 5, &queens)); // 同行
        assert!(is_attacked(6, 0, &queens)); // 同列
        assert!(is_attacked(3, 3, &queens)); // 对角线
        assert!(!is_attacked(1, 2, &queens));
        assert!(!is_attacked(4, 5, &[]));

        let anti = [Square::new_unchecked(2, 5)];
        assert!(is_attacked(4, 3, &anti));
    }

    #[test]
    fn test_incomplete_or_conflicting_placements() {
        let partial = [Square::new_unchecked(0, 0), Square::new_unchecked(1, 2)];
        assert!(!is_complete_solution(&partial));

        let mut conflicting = placement_squares(&[0, 4, 7, 5, 2, 6, 1, 3]);
        assert!(is_complete_solution(&conflicting));
        conflicting[7] = Square::new_unchecked(3, 3);
        assert!(!is_complete_solution(&conflicting));
    }

    #[test]
    fn test_solution_key_is_order_independent() {
        let a = placement_squares(&[0, 4, 7, 5, 2, 6, 1, 3]);
        let mut b = a.clone();
        b.reverse();
        assert_eq!(solution_key(&a), solution_key(&b));
        assert_eq!(solution_key(&a), "0016243741536572");
    }
}
