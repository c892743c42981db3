//! 协议常量定义

/// 国际象棋棋盘边长（八皇后、骑士巡游）
pub const CHESS_BOARD_SIZE: usize = 8;

/// 骑士巡游需要访问的格子总数
pub const TOUR_LENGTH: usize = CHESS_BOARD_SIZE * CHESS_BOARD_SIZE;

/// 八皇后的解数量（回归基准值）
pub const EIGHT_QUEENS_SOLUTIONS: u64 = 92;

/// 井字棋棋盘边长（五子连线获胜）
pub const TICTACTOE_SIZE: usize = 5;

/// 井字棋：O 获胜的评分
pub const O_WIN_SCORE: i32 = 10;

/// 井字棋：X 获胜的评分
pub const X_WIN_SCORE: i32 = -10;

/// Minimax 默认搜索深度
pub const DEFAULT_MINIMAX_DEPTH: u8 = 2;

/// 蒙特卡洛默认模拟次数
pub const DEFAULT_SIMULATIONS: u32 = 30;

/// 三柱汉诺塔默认柱名
pub const THREE_PEGS: [char; 3] = ['A', 'B', 'C'];

/// 四柱汉诺塔默认柱名
pub const FOUR_PEGS: [char; 4] = ['A', 'B', 'C', 'D'];

/// 汉诺塔允许的最大盘子数
pub const MAX_DISKS: u32 = 10;

/// 暴力搜索允许的最大城市数
pub const BRUTE_FORCE_MAX_CITIES: usize = 7;

/// 遗传算法默认种群大小
pub const DEFAULT_POPULATION_SIZE: usize = 60;

/// 遗传算法默认代数
pub const DEFAULT_GENERATIONS: usize = 100;

/// 遗传算法默认变异率
pub const DEFAULT_MUTATION_RATE: f64 = 0.2;

/// 精英保留数量
pub const ELITE_COUNT: usize = 2;

/// 父代选择窗口（排名前 N 的个体）
pub const PARENT_POOL_SIZE: usize = 10;
