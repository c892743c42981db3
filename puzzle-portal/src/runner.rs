//! 后台求解
//!
//! 耗时的同步求解（骑士巡游回溯、N 皇后枚举）放到 tokio 的阻塞线程池执行，
//! 调用方通过句柄等待结果。超时或取消后结果被丢弃；已经开始的计算会跑完，
//! 需要提前结束的搜索应同时设置步数上限。

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::settings::PortalSettings;

/// 后台求解错误
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("{name} timed out after {limit:?}")]
    Timeout { name: &'static str, limit: Duration },

    #[error("{name} failed: {reason}")]
    Failed { name: &'static str, reason: String },
}

/// 求解任务调度器
#[derive(Debug, Clone)]
pub struct SolveRunner {
    timeout: Option<Duration>,
}

impl SolveRunner {
    /// `timeout` 为 None 时一直等待
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self::new(settings.solve_timeout())
    }

    /// 提交任务，立即返回句柄
    pub fn submit<T, F>(&self, name: &'static str, job: F) -> SolveHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        debug!("提交后台求解: {}", name);
        SolveHandle {
            name,
            task: tokio::task::spawn_blocking(job),
            timeout: self.timeout,
            submitted_at: Instant::now(),
        }
    }
}

/// 后台求解句柄
pub struct SolveHandle<T> {
    name: &'static str,
    task: JoinHandle<T>,
    timeout: Option<Duration>,
    submitted_at: Instant,
}

impl<T> SolveHandle<T> {
    /// 等待结果
    pub async fn result(self) -> Result<T, SolveError> {
        let name = self.name;
        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.task).await {
                Ok(joined) => joined,
                Err(_) => {
                    warn!("{} 超时 ({:?})，丢弃结果", name, limit);
                    return Err(SolveError::Timeout { name, limit });
                }
            },
            None => self.task.await,
        };

        let value = joined.map_err(|e| SolveError::Failed {
            name,
            reason: e.to_string(),
        })?;
        debug!("{} 完成，用时 {:?}", name, self.submitted_at.elapsed());
        Ok(value)
    }

    /// 放弃等待，结果被丢弃
    pub fn cancel(self) {
        debug!("取消后台求解: {}", self.name);
        self.task.abort();
    }

    /// 任务是否已结束
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
