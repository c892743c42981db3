//! 汉诺塔柱状态与走法
//!
//! 每根柱子是一个栈，栈底为最大的盘子。走法合法当且仅当源柱非空，
//! 且目标柱为空或目标柱顶盘大于源柱顶盘。

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HanoiError;

/// 走法分隔符
const ARROW: &str = "->";

/// 汉诺塔走法（源柱 -> 目标柱）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HanoiMove {
    pub from: char,
    pub to: char,
}

impl HanoiMove {
    pub fn new(from: char, to: char) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for HanoiMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.from, ARROW, self.to)
    }
}

impl FromStr for HanoiMove {
    type Err = HanoiError;

    /// 解析 "A->C"（两侧允许空白）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || HanoiError::Malformed(s.trim().to_string());
        let (from, to) = s.split_once(ARROW).ok_or_else(malformed)?;
        Ok(Self {
            from: single_char(from.trim()).ok_or_else(malformed)?,
            to: single_char(to.trim()).ok_or_else(malformed)?,
        })
    }
}

/// 字符串恰好为一个字符时返回该字符
fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// 走法序列渲染为字符串列表
pub fn render_moves(moves: &[HanoiMove]) -> Vec<String> {
    moves.iter().map(ToString::to_string).collect()
}

/// 单根柱子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peg {
    pub label: char,
    /// 盘子大小，栈底在前
    pub disks: Vec<u32>,
}

/// 汉诺塔整体状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Towers {
    pegs: Vec<Peg>,
}

impl Towers {
    /// 创建初始状态：n 个盘子全部在第一根柱子上
    pub fn new(n: u32, labels: &[char]) -> Self {
        let pegs = labels
            .iter()
            .enumerate()
            .map(|(i, &label)| Peg {
                label,
                disks: if i == 0 { (1..=n).rev().collect() } else { Vec::new() },
            })
            .collect();
        Self { pegs }
    }

    /// 所有柱名
    pub fn labels(&self) -> Vec<char> {
        self.pegs.iter().map(|p| p.label).collect()
    }

    /// 获取柱子上的盘子（栈底在前）
    pub fn disks(&self, label: char) -> Option<&[u32]> {
        self.peg(label).map(|p| p.disks.as_slice())
    }

    /// 获取柱顶盘子
    pub fn top(&self, label: char) -> Option<u32> {
        self.peg(label).and_then(|p| p.disks.last().copied())
    }

    /// 盘子总数
    pub fn total_disks(&self) -> usize {
        self.pegs.iter().map(|p| p.disks.len()).sum()
    }

    /// 所有盘子是否都在目标柱上
    pub fn is_solved(&self, destination: char) -> bool {
        self.disks(destination)
            .is_some_and(|d| d.len() == self.total_disks())
    }

    fn peg(&self, label: char) -> Option<&Peg> {
        self.pegs.iter().find(|p| p.label == label)
    }

    fn peg_index(&self, label: char) -> Option<usize> {
        self.pegs.iter().position(|p| p.label == label)
    }

    /// 检查走法是否合法（不修改状态）
    pub fn validate(&self, mv: HanoiMove) -> Result<(), HanoiError> {
        self.check(mv, &mv.to_string()).map(|_| ())
    }

    /// 执行走法，非法时返回描述性错误且状态不变
    pub fn apply(&mut self, mv: HanoiMove) -> Result<(), HanoiError> {
        let (from, to) = self.check(mv, &mv.to_string())?;
        self.move_top(from, to);
        Ok(())
    }

    /// 重放逗号分隔的走法序列（如 "A->B, A->C"）
    ///
    /// 空项和不完整项被跳过；遇到第一个错误即停止，已执行的走法保留。
    /// 成功时返回执行的走法数。
    pub fn replay(&mut self, sequence: &str) -> Result<usize, HanoiError> {
        let mut applied = 0;
        for raw in sequence.split(',').map(str::trim) {
            let Some((from, to)) = raw.split_once(ARROW) else {
                continue;
            };
            let (from, to) = (from.trim(), to.trim());
            if from.is_empty() || to.is_empty() {
                continue;
            }
            let (Some(from), Some(to)) = (single_char(from), single_char(to)) else {
                return Err(HanoiError::UnknownPeg(raw.to_string()));
            };
            let (from_idx, to_idx) = match self.check(HanoiMove::new(from, to), raw) {
                Ok(pegs) => pegs,
                Err(e) => {
                    debug!("走法序列在第 {} 步被拒绝: {}", applied + 1, e);
                    return Err(e);
                }
            };
            self.move_top(from_idx, to_idx);
            applied += 1;
        }
        Ok(applied)
    }

    /// 合法性检查，返回源柱和目标柱的下标
    fn check(&self, mv: HanoiMove, text: &str) -> Result<(usize, usize), HanoiError> {
        let (Some(from), Some(to)) = (self.peg_index(mv.from), self.peg_index(mv.to)) else {
            return Err(HanoiError::UnknownPeg(text.to_string()));
        };
        let Some(&disk) = self.pegs[from].disks.last() else {
            return Err(HanoiError::EmptyPeg {
                peg: mv.from,
                mv: text.to_string(),
            });
        };
        if let Some(&top) = self.pegs[to].disks.last() {
            if disk > top {
                return Err(HanoiError::LargerOnSmaller {
                    disk,
                    top,
                    mv: text.to_string(),
                });
            }
        }
        Ok((from, to))
    }

    fn move_top(&mut self, from: usize, to: usize) {
        if let Some(disk) = self.pegs[from].disks.pop() {
            self.pegs[to].disks.push(disk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FOUR_PEGS, THREE_PEGS};

    #[test]
    fn test_initial_towers() {
        let towers = Towers::new(3, &THREE_PEGS);
        assert_eq!(towers.disks('A'), Some(&[3, 2, 1][..]));
        assert_eq!(towers.disks('B'), Some(&[][..]));
        assert_eq!(towers.top('A'), Some(1));
        assert_eq!(towers.total_disks(), 3);
        assert!(!towers.is_solved('C'));
    }

    #[test]
    fn test_move_parse_and_display() {
        let mv: HanoiMove = " A -> C ".parse().unwrap();
        assert_eq!(mv, HanoiMove::new('A', 'C'));
        assert_eq!(mv.to_string(), "A->C");
        assert_eq!(
            "AC".parse::<HanoiMove>(),
            Err(HanoiError::Malformed("AC".to_string()))
        );
        assert!("AB->C".parse::<HanoiMove>().is_err());
    }

    #[test]
    fn test_apply_legal_move() {
        let mut towers = Towers::new(2, &THREE_PEGS);
        towers.apply(HanoiMove::new('A', 'B')).unwrap();
        assert_eq!(towers.disks('A'), Some(&[2][..]));
        assert_eq!(towers.disks('B'), Some(&[1][..]));
    }

    #[test]
    fn test_apply_illegal_moves_leave_state_unchanged() {
        let mut towers = Towers::new(2, &THREE_PEGS);
        towers.apply(HanoiMove::new('A', 'B')).unwrap();
        let before = towers.clone();

        assert_eq!(
            towers.apply(HanoiMove::new('A', 'B')),
            Err(HanoiError::LargerOnSmaller {
                disk: 2,
                top: 1,
                mv: "A->B".to_string()
            })
        );
        assert_eq!(
            towers.apply(HanoiMove::new('C', 'A')),
            Err(HanoiError::EmptyPeg {
                peg: 'C',
                mv: "C->A".to_string()
            })
        );
        assert_eq!(
            towers.apply(HanoiMove::new('A', 'Z')),
            Err(HanoiError::UnknownPeg("A->Z".to_string()))
        );
        assert_eq!(towers, before);
    }

    #[test]
    fn test_replay_solves_three_disks() {
        let mut towers = Towers::new(3, &THREE_PEGS);
        let applied = towers
            .replay("A->C, A->B, C->B, A->C, B->A, B->C, A->C")
            .unwrap();
        assert_eq!(applied, 7);
        assert!(towers.is_solved('C'));
    }

    #[test]
    fn test_replay_skips_blank_and_partial_entries() {
        let mut towers = Towers::new(2, &THREE_PEGS);
        let applied = towers.replay("A->B, , A->, ->C, A->C").unwrap();
        assert_eq!(applied, 2);
        assert_eq!(towers.disks('C'), Some(&[2][..]));
    }

    #[test]
    fn test_replay_stops_at_first_error() {
        let mut towers = Towers::new(3, &THREE_PEGS);
        let err = towers.replay("A->C, A->C, A->B").unwrap_err();
        assert_eq!(
            err,
            HanoiError::LargerOnSmaller {
                disk: 2,
                top: 1,
                mv: "A->C".to_string()
            }
        );
        assert_eq!(err.to_string(), "Invalid move: Disk 2 cannot be placed on smaller disk 1 in move: \"A->C\"");
        // 第一步已执行，第三步未执行
        assert_eq!(towers.disks('A'), Some(&[3, 2][..]));
        assert_eq!(towers.disks('C'), Some(&[1][..]));
    }

    #[test]
    fn test_replay_unknown_peg() {
        let mut towers = Towers::new(3, &THREE_PEGS);
        assert_eq!(
            towers.replay("A->D"),
            Err(HanoiError::UnknownPeg("A->D".to_string()))
        );

        let mut four = Towers::new(3, &FOUR_PEGS);
        assert_eq!(four.replay("A->D"), Ok(1));
    }
}
