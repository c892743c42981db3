//! 错误类型定义

use thiserror::Error;

/// 棋盘坐标记谱错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// 记谱长度不是两个字符
    #[error("Invalid square notation: {0:?}")]
    Malformed(String),

    /// 列字母超出 a-h
    #[error("Invalid file '{0}'")]
    InvalidFile(char),

    /// 行号超出 1-8
    #[error("Invalid rank '{0}'")]
    InvalidRank(char),
}

/// 井字棋落子错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeError {
    /// 坐标超出棋盘
    #[error("Cell ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    /// 格子已被占用
    #[error("Cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    /// 对局已结束
    #[error("Game is already over")]
    GameOver,
}

/// 汉诺塔走法错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HanoiError {
    /// 走法文本无法解析
    #[error("Malformed move: \"{0}\"")]
    Malformed(String),

    /// 柱名不存在
    #[error("Invalid peg name in move: \"{0}\"")]
    UnknownPeg(String),

    /// 源柱为空
    #[error("No disk on peg {peg} for move: \"{mv}\"")]
    EmptyPeg { peg: char, mv: String },

    /// 大盘压小盘
    #[error("Invalid move: Disk {disk} cannot be placed on smaller disk {top} in move: \"{mv}\"")]
    LargerOnSmaller { disk: u32, top: u32, mv: String },

    /// 盘子数超出上限
    #[error("Number of disks must be at most {max}, got {count}")]
    TooManyDisks { count: u32, max: u32 },
}

/// 旅行商输入错误（所有求解器统一返回空结果）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TspInputError {
    /// 城市数少于 2
    #[error("At least 2 cities are required, got {0}")]
    TooFewCities(usize),

    /// 城市列表包含起点
    #[error("Home vertex {0} must not be in the city list")]
    HomeInCities(usize),

    /// 城市重复
    #[error("City {0} appears more than once")]
    DuplicateCity(usize),

    /// 顶点超出距离矩阵
    #[error("Vertex {vertex} is outside the {size}x{size} distance matrix")]
    VertexOutOfRange { vertex: usize, size: usize },

    /// 暴力搜索城市过多
    #[error("Brute force is limited to {max} cities, got {count}")]
    TooManyCities { count: usize, max: usize },
}

/// 骑士巡游玩家走子错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TourMoveError {
    /// 不是马的走法
    #[error("Invalid knight move!")]
    NotKnightMove,

    /// 格子已访问
    #[error("Square already visited!")]
    AlreadyVisited,

    /// 对局已结束
    #[error("The tour is already over")]
    GameOver,
}
