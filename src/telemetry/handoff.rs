//! 生产者 / 渲染线程之间的"最新值优先"交接
//!
//! 模拟核心在自己的线程上推送样本，渲染线程在每帧读取最新值。
//! 交接使用序列锁：写端把序列号改为奇数、写入字段、再改回偶数；
//! 读端在序列号前后一致且为偶数时接受读到的值。所有字段都是原子量，
//! 写端不分配内存，读端不会阻塞写端，旧值直接被覆盖而不排队。
//! 读端的重试次数有上限：写端停在写入中途时读取失败，而不是一直自旋。

use std::hint;
use std::sync::atomic::{fence, AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use super::sample::PerformanceSample;

/// 读端放弃前的最大尝试次数
const READ_ATTEMPTS: usize = 64;

/// 一次读取的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSnapshot {
    /// 数据版本：性能字段或温度任一更新都会使其增大
    pub version: u64,
    /// 性能字段的写入次数
    pub stats_version: u64,
    /// 温度的写入次数
    pub temperature_version: u64,
    pub sample: PerformanceSample,
}

/// 共享的样本槽位
#[derive(Debug)]
pub struct SampleSlot {
    seq: AtomicU64,
    fps: AtomicU32,
    frame_time_ms: AtomicU32,
    speed_percent: AtomicU32,
    shaders_building: AtomicU32,

    temp_version: AtomicU64,
    battery_temp_c: AtomicU32,

    redraw: AtomicBool,
}

impl SampleSlot {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            fps: AtomicU32::new(0),
            frame_time_ms: AtomicU32::new(0),
            speed_percent: AtomicU32::new(0),
            shaders_building: AtomicU32::new(0),
            temp_version: AtomicU64::new(0),
            battery_temp_c: AtomicU32::new(0.0f32.to_bits()),
            redraw: AtomicBool::new(false),
        }
    }

    /// 写入最新的性能统计
    ///
    /// 写端之间通过把序列号改为奇数来互斥；只有一个生产者时不会发生竞争。
    pub fn write_latest(&self, fps: f32, frame_time_ms: f32, speed_percent: f32, shaders_building: u32) {
        let start = self.begin_write();

        self.fps.store(fps.to_bits(), Ordering::Relaxed);
        self.frame_time_ms.store(frame_time_ms.to_bits(), Ordering::Relaxed);
        self.speed_percent.store(speed_percent.to_bits(), Ordering::Relaxed);
        self.shaders_building.store(shaders_building, Ordering::Relaxed);

        self.end_write(start);
    }

    /// 把序列号改为奇数，返回写入前的值
    pub(crate) fn begin_write(&self) -> u64 {
        let start = loop {
            let s = self.seq.load(Ordering::Relaxed);
            if s & 1 == 0
                && self
                    .seq
                    .compare_exchange_weak(s, s.wrapping_add(1), Ordering::Relaxed, Ordering::Relaxed)
                    .is_ok()
            {
                break s;
            }
            hint::spin_loop();
        };
        fence(Ordering::Release);
        start
    }

    /// 发布写入：序列号回到偶数并请求重绘
    pub(crate) fn end_write(&self, start: u64) {
        self.seq.store(start.wrapping_add(2), Ordering::Release);
        self.request_redraw();
    }

    /// 写入最新的电池温度（单个原子量，本身就是最新值槽位）
    pub fn write_temperature(&self, celsius: f32) {
        self.battery_temp_c.store(celsius.to_bits(), Ordering::Relaxed);
        self.temp_version.fetch_add(1, Ordering::Release);
        self.request_redraw();
    }

    /// 读取最新值
    ///
    /// 写端在 [`READ_ATTEMPTS`] 次尝试内都没有完成写入时返回 `None`。
    pub fn read_latest(&self) -> Option<SampleSnapshot> {
        let mut stats = None;
        for _ in 0..READ_ATTEMPTS {
            let s0 = self.seq.load(Ordering::Acquire);
            if s0 & 1 == 1 {
                hint::spin_loop();
                continue;
            }

            let fps = f32::from_bits(self.fps.load(Ordering::Relaxed));
            let frame_time_ms = f32::from_bits(self.frame_time_ms.load(Ordering::Relaxed));
            let speed = f32::from_bits(self.speed_percent.load(Ordering::Relaxed));
            let shaders = self.shaders_building.load(Ordering::Relaxed);

            fence(Ordering::Acquire);
            let s1 = self.seq.load(Ordering::Relaxed);
            if s0 == s1 {
                stats = Some((s0, fps, frame_time_ms, speed, shaders));
                break;
            }
            hint::spin_loop();
        }
        let (seq, fps, frame_time_ms, speed, shaders) = stats?;

        let temp_version = self.temp_version.load(Ordering::Acquire);
        let battery_temp_c = f32::from_bits(self.battery_temp_c.load(Ordering::Relaxed));

        Some(SampleSnapshot {
            version: (seq / 2).wrapping_add(temp_version),
            stats_version: seq / 2,
            temperature_version: temp_version,
            sample: PerformanceSample::new(fps, frame_time_ms, speed, shaders, battery_temp_c),
        })
    }

    /// 取出并清除重绘请求
    pub fn take_redraw(&self) -> bool {
        self.redraw.swap(false, Ordering::Acquire)
    }

    /// 设置重绘请求
    pub(crate) fn request_redraw(&self) {
        self.redraw.store(true, Ordering::Release);
    }
}

impl Default for SampleSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// 生产者持有的发布句柄
///
/// 可以克隆并发送到模拟核心线程；所有方法都不阻塞、不分配。
#[derive(Debug, Clone)]
pub struct SamplePublisher {
    slot: Arc<SampleSlot>,
}

impl SamplePublisher {
    pub(crate) fn new(slot: Arc<SampleSlot>) -> Self {
        Self { slot }
    }

    /// 宿主接口：推送性能统计
    pub fn update_performance_stats(&self, fps: f32, frame_time_ms: f32, speed_percent: f32, shaders_building: u32) {
        self.slot.write_latest(fps, frame_time_ms, speed_percent, shaders_building);
    }

    /// 宿主接口：推送电池温度
    pub fn update_temperature(&self, celsius: f32) {
        self.slot.write_temperature(celsius);
    }

    /// 推送一个完整样本
    pub fn publish(&self, sample: PerformanceSample) {
        self.slot.write_latest(
            sample.fps,
            sample.frame_time_ms,
            sample.emulation_speed_percent,
            sample.shaders_building,
        );
        self.slot.write_temperature(sample.battery_temp_c);
    }
}

/// 创建一对槽位与发布句柄
pub fn channel() -> (Arc<SampleSlot>, SamplePublisher) {
    let slot = Arc::new(SampleSlot::new());
    let publisher = SamplePublisher::new(Arc::clone(&slot));
    (slot, publisher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_initial_snapshot() {
        let slot = SampleSlot::new();
        let snapshot = slot.read_latest().unwrap();
        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.sample, PerformanceSample::default());
        assert!(!slot.take_redraw());
    }

    #[test]
    fn test_latest_value_wins() {
        let (slot, publisher) = channel();
        publisher.update_performance_stats(30.0, 33.3, 50.0, 1);
        publisher.update_performance_stats(60.0, 16.6, 100.0, 0);

        let snapshot = slot.read_latest().unwrap();
        assert_eq!(snapshot.sample.fps, 60.0);
        assert_eq!(snapshot.sample.frame_time_ms, 16.6);
        assert_eq!(snapshot.sample.shaders_building, 0);
        assert!(slot.take_redraw());
        assert!(!slot.take_redraw());
    }

    #[test]
    fn test_version_changes_on_each_write() {
        let (slot, publisher) = channel();
        let v0 = slot.read_latest().unwrap().version;

        publisher.update_performance_stats(60.0, 16.6, 100.0, 0);
        let v1 = slot.read_latest().unwrap().version;
        assert_ne!(v1, v0);

        publisher.update_temperature(38.5);
        let snapshot = slot.read_latest().unwrap();
        assert_ne!(snapshot.version, v1);
        assert_eq!(snapshot.sample.battery_temp_c, 38.5);
        assert_eq!(snapshot.stats_version, 1);
        assert_eq!(snapshot.temperature_version, 1);
        assert_eq!(slot.read_latest().unwrap().version, snapshot.version);
    }

    #[test]
    fn test_reader_never_sees_torn_sample() {
        let (slot, publisher) = channel();

        let writer = thread::spawn(move || {
            for i in 1..=20_000u32 {
                let v = i as f32;
                publisher.update_performance_stats(v, v, v, i);
            }
        });

        for _ in 0..20_000 {
            if let Some(snapshot) = slot.read_latest() {
                let s = snapshot.sample;
                assert_eq!(s.fps, s.frame_time_ms);
                assert_eq!(s.fps, s.emulation_speed_percent);
                assert_eq!(s.fps, s.shaders_building as f32);
            }
        }

        writer.join().unwrap();
        assert_eq!(slot.read_latest().unwrap().sample.shaders_building, 20_000);
    }

    #[test]
    fn test_stalled_writer_fails_read() {
        let (slot, publisher) = channel();
        publisher.update_performance_stats(60.0, 16.6, 100.0, 0);

        let start = slot.begin_write();
        assert!(slot.read_latest().is_none());

        slot.end_write(start);
        let snapshot = slot.read_latest().unwrap();
        assert_eq!(snapshot.stats_version, 2);
        assert_eq!(snapshot.sample.fps, 60.0);
    }
}
