//! 叠加层状态
//!
//! 每个叠加层实例独占一份 `OverlayState`，只在渲染 / UI 线程上修改。
//! 生产者线程的样本经由 `telemetry::handoff` 交接，再由视图在 UI 线程
//! 调用 [`OverlayState::update`] 合入。

use crate::math::Vector2;
use crate::telemetry::severity::{Metric, SeverityTier, Thresholds};
use crate::telemetry::{PerformanceSample, RollingWindow};

use super::animation::AnimationPhase;

/// 叠加层状态
#[derive(Debug, Clone)]
pub struct OverlayState {
    sample: PerformanceSample,
    window: RollingWindow,
    thresholds: Thresholds,

    fps_tier: SeverityTier,
    temperature_tier: SeverityTier,
    ram_tier: SeverityTier,
    ram_usage_percent: f32,

    phase: AnimationPhase,
    is_animating: bool,

    position: Vector2,
    is_dragging: bool,
}

impl OverlayState {
    pub fn new(history_capacity: usize, animation_step: f32, thresholds: Thresholds) -> Self {
        let sample = PerformanceSample::default();
        Self {
            fps_tier: thresholds.classify(Metric::Fps, sample.fps),
            temperature_tier: thresholds.classify(Metric::Temperature, sample.battery_temp_c),
            ram_tier: thresholds.classify(Metric::RamUsage, 0.0),
            ram_usage_percent: 0.0,
            sample,
            window: RollingWindow::new(history_capacity),
            thresholds,
            phase: AnimationPhase::new(animation_step),
            is_animating: false,
            position: Vector2::zeros(),
            is_dragging: false,
        }
    }

    /// 合入一个新样本
    ///
    /// 无效字段保留上一次的值后存储样本，帧时间为正时写入滚动窗口，重新计算等级，
    /// 并根据着色器编译数量更新 `is_animating`。返回是否需要启停动画：
    /// `Some(true)` 启动，`Some(false)` 停止，`None` 保持。
    pub fn update(&mut self, sample: PerformanceSample) -> Option<bool> {
        // 窗口只接收本次样本自己的有效帧时间
        self.window.push(sample.frame_time_ms);

        let sample = sample.merged_onto(&self.sample);
        self.sample = sample;

        self.fps_tier = self.thresholds.classify(Metric::Fps, sample.fps);
        self.temperature_tier = self.thresholds.classify(Metric::Temperature, sample.battery_temp_c);

        let building = sample.shaders_building > 0;
        let transition = match (self.is_animating, building) {
            (false, true) => Some(true),
            (true, false) => Some(false),
            _ => None,
        };
        self.is_animating = building;
        if !building {
            self.phase.reset();
        }
        transition
    }

    /// 仅更新温度读数
    pub fn update_temperature(&mut self, celsius: f32) -> bool {
        if !celsius.is_finite() {
            return false;
        }
        self.sample.battery_temp_c = celsius;
        self.temperature_tier = self.thresholds.classify(Metric::Temperature, celsius);
        true
    }

    /// 仅更新内存占用百分比
    pub fn update_ram_usage(&mut self, percent: f32) -> bool {
        if !percent.is_finite() || percent < 0.0 {
            return false;
        }
        self.ram_usage_percent = percent.min(100.0);
        self.ram_tier = self.thresholds.classify(Metric::RamUsage, self.ram_usage_percent);
        true
    }

    pub fn sample(&self) -> &PerformanceSample {
        &self.sample
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn fps_tier(&self) -> SeverityTier {
        self.fps_tier
    }

    pub fn temperature_tier(&self) -> SeverityTier {
        self.temperature_tier
    }

    pub fn ram_tier(&self) -> SeverityTier {
        self.ram_tier
    }

    pub fn ram_usage_percent(&self) -> f32 {
        self.ram_usage_percent
    }

    pub fn animation_phase(&self) -> f32 {
        self.phase.value()
    }

    pub(crate) fn phase_mut(&mut self) -> &mut AnimationPhase {
        &mut self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new(
            crate::telemetry::window::DEFAULT_CAPACITY,
            super::animation::DEFAULT_STEP,
            Thresholds::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(fps: f32, frame_time_ms: f32, shaders: u32) -> PerformanceSample {
        PerformanceSample::new(fps, frame_time_ms, 100.0, shaders, 25.0)
    }

    #[test]
    fn test_update_pushes_positive_frame_times() {
        let mut state = OverlayState::default();
        state.update(sample(60.0, 16.0, 0));
        state.update(sample(0.0, 0.0, 0));
        state.update(sample(30.0, 33.0, 0));

        assert_eq!(state.window().len(), 2);
        assert_eq!(state.fps_tier(), SeverityTier::Poor);
        assert_eq!(state.sample().fps, 30.0);
    }

    #[test]
    fn test_update_reports_animation_transitions() {
        let mut state = OverlayState::default();
        assert_eq!(state.update(sample(60.0, 16.0, 3)), Some(true));
        assert!(state.is_animating());
        assert_eq!(state.update(sample(60.0, 16.0, 2)), None);
        assert_eq!(state.update(sample(60.0, 16.0, 0)), Some(false));
        assert!(!state.is_animating());
    }

    #[test]
    fn test_update_keeps_prior_values_for_anomalies() {
        let mut state = OverlayState::default();
        state.update(PerformanceSample::new(60.0, 16.6, 100.0, 0, 35.0));
        state.update(PerformanceSample::new(f32::NAN, -4.0, -10.0, 0, f32::NAN));

        assert_eq!(state.sample().fps, 60.0);
        assert_eq!(state.sample().emulation_speed_percent, 100.0);
        assert_eq!(state.sample().battery_temp_c, 35.0);
        assert_eq!(state.window().len(), 1);
        assert_eq!(state.fps_tier(), SeverityTier::Good);
        assert_eq!(state.temperature_tier(), SeverityTier::Moderate);
    }

    #[test]
    fn test_temperature_and_ram() {
        let mut state = OverlayState::default();
        assert!(state.update_temperature(45.0));
        assert_eq!(state.temperature_tier(), SeverityTier::Poor);
        assert!(!state.update_temperature(f32::NAN));
        assert_eq!(state.sample().battery_temp_c, 45.0);

        assert!(state.update_ram_usage(80.0));
        assert_eq!(state.ram_tier(), SeverityTier::Poor);
        assert!(!state.update_ram_usage(-1.0));
        assert_eq!(state.ram_usage_percent(), 80.0);
    }
}
