//! 帧时间滚动窗口
//!
//! 固定容量的 FIFO 缓冲区，保存最近的帧时间样本，并在每次修改后
//! 重新计算 min / max / avg。容量按样本数计算（默认 120，约等于
//! 60 Hz 下的 2 秒），与推送频率无关。

use std::collections::VecDeque;

/// 默认历史容量
pub const DEFAULT_CAPACITY: usize = 120;

/// 窗口为空时的基准帧时间（60 Hz 参考帧）
pub const BASELINE_FRAME_TIME_MS: f32 = 16.67;

/// 窗口统计结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub min: f32,
    pub max: f32,
    pub avg: f32,
}

impl WindowStats {
    /// 空窗口时的中性基准
    pub const BASELINE: WindowStats = WindowStats {
        min: BASELINE_FRAME_TIME_MS,
        max: BASELINE_FRAME_TIME_MS,
        avg: BASELINE_FRAME_TIME_MS,
    };

    /// 将样本值归一化到 [0, 1]
    ///
    /// 历史为常量（`max == min`）时返回中点 0.5。
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range > 0.0 {
            (value - self.min) / range
        } else {
            0.5
        }
    }
}

/// 帧时间滚动窗口
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: VecDeque<f32>,
    capacity: usize,
    stats: WindowStats,
}

impl RollingWindow {
    /// 创建给定容量的窗口
    ///
    /// 容量为 0 属于调用约定错误：调试构建直接断言，发布构建按 1 处理。
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "rolling window capacity must be greater than 0");
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            stats: WindowStats::BASELINE,
        }
    }

    /// 追加一个样本，满时先淘汰最旧的样本
    ///
    /// 非正数或非有限值被忽略（暂停期间核心可能推送 0 帧时间）。
    /// 返回样本是否被接受。
    pub fn push(&mut self, value: f32) -> bool {
        if !(value.is_finite() && value > 0.0) {
            return false;
        }

        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
        self.recompute();
        true
    }

    /// 当前统计结果
    pub fn stats(&self) -> WindowStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 从旧到新遍历样本
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    /// 清空窗口，统计回到基准值
    pub fn clear(&mut self) {
        self.samples.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        if self.samples.is_empty() {
            self.stats = WindowStats::BASELINE;
            return;
        }

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for &value in &self.samples {
            min = min.min(value);
            max = max.max(value);
            sum += value as f64;
        }

        self.stats = WindowStats {
            min,
            max,
            avg: (sum / self.samples.len() as f64) as f32,
        };
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
