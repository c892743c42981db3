//! 5x5 井字棋棋盘
//!
//! 五子连线获胜：整行、整列或两条对角线。

use serde::{Deserialize, Serialize};

use crate::constants::TICTACTOE_SIZE;
use crate::error::TicTacToeError;

const N: usize = TICTACTOE_SIZE;

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// 获取对手
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// 获取显示字符
    pub fn to_char(&self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// 从字符解析
    pub fn from_char(c: char) -> Option<Player> {
        match c {
            'X' | 'x' => Some(Player::X),
            'O' | 'o' => Some(Player::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// 落子位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellMove {
    pub row: usize,
    pub col: usize,
}

impl CellMove {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Player>,
    pub draw: bool,
}

impl GameResult {
    /// 对局是否结束
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.draw
    }
}

/// 井字棋棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicTacToeBoard {
    cells: [[Option<Player>; N]; N],
}

impl TicTacToeBoard {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [[None; N]; N],
        }
    }

    /// 从 5 行文本构造，'X'/'O' 为棋子，其他字符为空
    pub fn from_rows(rows: [&str; N]) -> Option<Self> {
        let mut board = Self::empty();
        for (r, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != N {
                return None;
            }
            for (c, ch) in chars.into_iter().enumerate() {
                board.cells[r][c] = Player::from_char(ch);
            }
        }
        Some(board)
    }

    /// 获取格子内容
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// 所有空格（按行优先顺序）
    pub fn available_moves(&self) -> Vec<CellMove> {
        let mut moves = Vec::with_capacity(N * N);
        for r in 0..N {
            for c in 0..N {
                if self.cells[r][c].is_none() {
                    moves.push(CellMove::new(r, c));
                }
            }
        }
        moves
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// 统计某方棋子数量
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(player))
            .count()
    }

    /// 检查胜者：5 行、5 列、两条对角线
    pub fn winner(&self) -> Option<Player> {
        for r in 0..N {
            if let Some(p) = Self::uniform((0..N).map(|c| self.cells[r][c])) {
                return Some(p);
            }
        }
        for c in 0..N {
            if let Some(p) = Self::uniform((0..N).map(|r| self.cells[r][c])) {
                return Some(p);
            }
        }
        if let Some(p) = Self::uniform((0..N).map(|i| self.cells[i][i])) {
            return Some(p);
        }
        Self::uniform((0..N).map(|i| self.cells[i][N - 1 - i]))
    }

    /// 一条线上的格子是否全部为同一方
    fn uniform(mut line: impl Iterator<Item = Option<Player>>) -> Option<Player> {
        let first = line.next()??;
        line.all(|cell| cell == Some(first)).then_some(first)
    }

    /// 是否和棋：无胜者且无空格
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// 获取对局结果
    pub fn result(&self) -> GameResult {
        let winner = self.winner();
        GameResult {
            winner,
            draw: winner.is_none() && self.is_draw(),
        }
    }

    /// 落子（检查坐标和占用，失败时棋盘不变）
    pub fn play(&mut self, mv: CellMove, player: Player) -> Result<(), TicTacToeError> {
        if mv.row >= N || mv.col >= N {
            return Err(TicTacToeError::OutOfBounds {
                row: mv.row,
                col: mv.col,
            });
        }
        if self.cells[mv.row][mv.col].is_some() {
            return Err(TicTacToeError::Occupied {
                row: mv.row,
                col: mv.col,
            });
        }
        self.cells[mv.row][mv.col] = Some(player);
        Ok(())
    }

    /// 返回落子后的新棋盘（调用方保证该格为空）
    pub fn with_move(&self, mv: CellMove, player: Player) -> Self {
        let mut next = self.clone();
        next.cells[mv.row][mv.col] = Some(player);
        next
    }
}

impl Default for TicTacToeBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', |p| p.to_char()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
