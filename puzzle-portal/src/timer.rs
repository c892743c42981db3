//! 玩家计时
//!
//! 八皇后成绩按用时计分，暂停期间不计时

use std::time::{Duration, Instant};

/// 玩家用时计时器
#[derive(Debug)]
pub struct PlayTimer {
    /// 暂停前累计的时间
    accumulated: Duration,
    /// 当前计时段开始时间，暂停时为 None
    segment_start: Option<Instant>,
}

impl PlayTimer {
    /// 创建并立即开始计时
    pub fn start() -> Self {
        Self {
            accumulated: Duration::ZERO,
            segment_start: Some(Instant::now()),
        }
    }

    /// 已用时间
    pub fn elapsed(&self) -> Duration {
        match self.segment_start {
            Some(start) => self.accumulated + start.elapsed(),
            None => self.accumulated,
        }
    }

    /// 已用秒数
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// 暂停
    pub fn pause(&mut self) {
        if let Some(start) = self.segment_start.take() {
            self.accumulated += start.elapsed();
        }
    }

    /// 恢复
    pub fn resume(&mut self) {
        if self.segment_start.is_none() {
            self.segment_start = Some(Instant::now());
        }
    }

    /// 停止并返回总用时
    pub fn stop(&mut self) -> Duration {
        self.pause();
        self.accumulated
    }

    /// 清零并重新开始
    pub fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
        self.segment_start = Some(Instant::now());
    }

    /// 是否暂停
    pub fn is_paused(&self) -> bool {
        self.segment_start.is_none()
    }
}

impl Default for PlayTimer {
    fn default() -> Self {
        Self::start()
    }
}
