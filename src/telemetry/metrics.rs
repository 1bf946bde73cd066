//! 帧率统计模块
//!
//! FrameCounter 根据记录的帧时刻计算帧率和平均帧时间，
//! 宿主程序用它从模拟的渲染循环合成性能样本。

use std::time::{Duration, Instant};

/// 帧率统计（帧率、帧时间）
#[derive(Debug, Clone)]
pub struct FrameCounter {
    frame_count: u32,
    last_update: Instant,
    update_interval: Duration,
    fps: f32,
    frame_time_ms: f32,
}

impl FrameCounter {
    /// 创建新的统计器，每秒更新一次
    pub fn new() -> Self {
        Self::with_interval(Instant::now(), Duration::from_secs(1))
    }

    /// 以给定起点和更新间隔创建统计器
    pub fn with_interval(start: Instant, update_interval: Duration) -> Self {
        Self {
            frame_count: 0,
            last_update: start,
            update_interval,
            fps: 0.0,
            frame_time_ms: 0.0,
        }
    }

    /// 记录一帧
    pub fn record_frame(&mut self) -> bool {
        self.record_frame_at(Instant::now())
    }

    /// 在给定时刻记录一帧，统计值更新时返回 true
    pub fn record_frame_at(&mut self, now: Instant) -> bool {
        self.frame_count += 1;
        let elapsed = now.saturating_duration_since(self.last_update);

        if elapsed >= self.update_interval && !elapsed.is_zero() {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_time_ms = 1000.0 / self.fps;
            self.frame_count = 0;
            self.last_update = now;
            true
        } else {
            false
        }
    }

    /// 获取当前 FPS
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// 获取当前帧时间（毫秒）
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_after_interval() {
        let start = Instant::now();
        let mut counter = FrameCounter::with_interval(start, Duration::from_millis(500));

        let mut updated = false;
        for i in 1..=30u64 {
            updated = counter.record_frame_at(start + Duration::from_micros(16_667 * i));
        }
        assert!(updated);
        assert!((counter.fps() - 60.0).abs() < 0.5);
        assert!((counter.frame_time_ms() - 16.667).abs() < 0.2);
    }

    #[test]
    fn test_no_update_before_interval() {
        let start = Instant::now();
        let mut counter = FrameCounter::with_interval(start, Duration::from_secs(1));
        assert!(!counter.record_frame_at(start + Duration::from_millis(10)));
        assert_eq!(counter.fps(), 0.0);
    }
}
