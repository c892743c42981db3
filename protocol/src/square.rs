//! 8x8 棋盘格子与记谱
//!
//! 八皇后和骑士巡游共用的坐标类型。行号 0 在棋盘上方，
//! 对应记谱的第 8 行；列号 0 对应 a 列。

use serde::{Deserialize, Serialize};

use crate::constants::CHESS_BOARD_SIZE;
use crate::error::NotationError;

/// 列字母
const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// 马的 8 个走法偏移 (Δrow, Δcol)，顺序固定，决定搜索的枚举顺序
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// 棋盘格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    /// 行 (0-7)
    pub row: u8,
    /// 列 (0-7)
    pub col: u8,
}

impl Square {
    /// 创建新格子
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < CHESS_BOARD_SIZE && (col as usize) < CHESS_BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查格子是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < CHESS_BOARD_SIZE && (self.col as usize) < CHESS_BOARD_SIZE
    }

    /// 获取偏移后的格子
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        let size = CHESS_BOARD_SIZE as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * CHESS_BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CHESS_BOARD_SIZE * CHESS_BOARD_SIZE {
            Some(Square {
                row: (index / CHESS_BOARD_SIZE) as u8,
                col: (index % CHESS_BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 转换为记谱（如 "a1"）
    pub fn to_notation(&self) -> String {
        format!("{}{}", FILES[self.col as usize], CHESS_BOARD_SIZE - self.row as usize)
    }

    /// 从记谱解析
    pub fn from_notation(s: &str) -> Result<Self, NotationError> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(NotationError::Malformed(s.to_string()));
        };

        let col = FILES
            .iter()
            .position(|&f| f == file)
            .ok_or(NotationError::InvalidFile(file))?;
        let rank_num = rank
            .to_digit(10)
            .filter(|d| (1..=CHESS_BOARD_SIZE as u32).contains(d))
            .ok_or(NotationError::InvalidRank(rank))?;

        Ok(Square {
            row: (CHESS_BOARD_SIZE as u32 - rank_num) as u8,
            col: col as u8,
        })
    }

    /// 两个格子之间是否为一步马走法
    pub fn is_knight_step(&self, other: Square) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 2 && dc == 1) || (dr == 1 && dc == 2)
    }

    /// 马从当前格出发可到达的所有格子（按固定偏移顺序）
    pub fn knight_moves(&self) -> impl Iterator<Item = Square> {
        let origin = *self;
        KNIGHT_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| origin.offset(dr, dc))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 判断两个记谱格子之间是否为马走法，记谱无效时返回 false
pub fn is_knight_move(from: &str, to: &str) -> bool {
    match (Square::from_notation(from), Square::from_notation(to)) {
        (Ok(a), Ok(b)) => a.is_knight_step(b),
        _ => false,
    }
}

/// 马从 `from` 出发、尚未访问过的后继格子
pub fn valid_knight_moves(from: Square, visited: &[Square]) -> Vec<Square> {
    from.knight_moves()
        .filter(|sq| !visited.contains(sq))
        .collect()
}
