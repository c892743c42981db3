//! 门户设置
//!
//! 提供设置数据结构和 JSON 持久化

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use protocol::{DEFAULT_MINIMAX_DEPTH, DEFAULT_SIMULATIONS};
use puzzle_ai::GeneticConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// EnvFilter 指令中的级别名
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 门户设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalSettings {
    // === 玩家 ===
    /// 默认玩家名
    pub player_name: String,

    // === 井字棋 ===
    /// Minimax 搜索深度
    pub minimax_depth: u8,
    /// 每个候选格子的随机模拟局数
    pub mcts_simulations: u32,

    // === 骑士巡游 ===
    /// 回溯搜索步数上限（None 为不限）
    pub knight_step_limit: Option<u64>,

    // === 旅行商 ===
    /// 遗传算法参数
    pub genetic: GeneticConfig,

    // === 运行 ===
    /// 后台求解超时（秒，0 为不限）
    pub solve_timeout_secs: u64,
    /// 日志级别
    pub log_level: LogLevel,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            minimax_depth: DEFAULT_MINIMAX_DEPTH,
            mcts_simulations: DEFAULT_SIMULATIONS,
            knight_step_limit: Some(50_000_000),
            genetic: GeneticConfig::default(),
            solve_timeout_secs: 30,
            log_level: LogLevel::default(),
        }
    }
}

impl PortalSettings {
    /// 默认设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("puzzle-portal");
            path.push("settings.json");
            path
        })
    }

    /// 加载设置：优先使用指定路径，否则使用默认路径；失败时回退到默认设置
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::settings_path() {
                Some(p) => p,
                None => {
                    warn!("无法获取配置目录，使用默认设置");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            info!("设置文件不存在，使用默认设置");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("已加载设置: {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{:#}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 从文件读取设置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取设置文件: {:?}", path))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("设置文件格式无效: {:?}", path))?;
        settings
            .genetic
            .validate()
            .context("遗传算法参数无效")?;
        Ok(settings)
    }

    /// 保存设置到文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        fs::write(path, content).with_context(|| format!("写入设置文件失败: {:?}", path))?;

        info!("设置已保存: {:?}", path);
        Ok(())
    }

    /// 保存到默认路径
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::settings_path().context("无法获取配置目录")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// 后台求解超时，0 表示不限
    pub fn solve_timeout(&self) -> Option<std::time::Duration> {
        (self.solve_timeout_secs > 0).then(|| std::time::Duration::from_secs(self.solve_timeout_secs))
    }
}
