//! 性能样本
//!
//! 模拟核心每次推送的一组观测值。

/// 一次性能观测
///
/// 不可变值类型：每次更新时被消费一次，只有帧时间会被折叠进滚动窗口。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerformanceSample {
    /// 帧率
    pub fps: f32,
    /// 帧时间（毫秒）
    pub frame_time_ms: f32,
    /// 模拟速度（百分比）
    pub emulation_speed_percent: f32,
    /// 正在编译的着色器数量
    pub shaders_building: u32,
    /// 电池温度（摄氏度）
    pub battery_temp_c: f32,
}

impl PerformanceSample {
    pub fn new(
        fps: f32,
        frame_time_ms: f32,
        emulation_speed_percent: f32,
        shaders_building: u32,
        battery_temp_c: f32,
    ) -> Self {
        Self {
            fps,
            frame_time_ms,
            emulation_speed_percent,
            shaders_building,
            battery_temp_c,
        }
    }

    /// 把样本合并到上一次的有效值上
    ///
    /// 负数或非有限的 fps / 帧时间 / 速度保留 `previous` 中的值；温度只在
    /// 非有限时保留旧值，零下温度是合法读数。
    pub fn merged_onto(self, previous: &PerformanceSample) -> Self {
        Self {
            fps: keep_valid(self.fps, previous.fps, is_valid_rate),
            frame_time_ms: keep_valid(self.frame_time_ms, previous.frame_time_ms, is_valid_rate),
            emulation_speed_percent: keep_valid(
                self.emulation_speed_percent,
                previous.emulation_speed_percent,
                is_valid_rate,
            ),
            shaders_building: self.shaders_building,
            battery_temp_c: keep_valid(self.battery_temp_c, previous.battery_temp_c, |v: &f32| v.is_finite()),
        }
    }

    /// 样本中是否有无效字段
    pub fn is_anomalous(&self) -> bool {
        !(is_valid_rate(&self.fps)
            && is_valid_rate(&self.frame_time_ms)
            && is_valid_rate(&self.emulation_speed_percent)
            && self.battery_temp_c.is_finite())
    }
}

fn is_valid_rate(value: &f32) -> bool {
    value.is_finite() && *value >= 0.0
}

fn keep_valid(value: f32, previous: f32, valid: impl Fn(&f32) -> bool) -> f32 {
    if valid(&value) {
        value
    } else {
        previous
    }
}
