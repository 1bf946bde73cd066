//! 单指标指示器：FPS、电池温度、内存占用
//!
//! 每个指示器独立持有状态，只在 UI 线程上更新和绘制。

use crate::math::Color;
use crate::telemetry::system::{MemorySnapshot, SystemInfoProvider};
use crate::telemetry::{Metric, PerformanceSample, Thresholds};

use super::canvas::Canvas;
use super::measure::{measure, preferred, MeasureSpec, ViewSize};
use super::panels::{indicator, round_half_up};
use super::state::OverlayState;
use super::style::tier_color;

/// 指示器共用的附加 / 分离逻辑
#[derive(Debug)]
struct IndicatorView {
    name: &'static str,
    preferred: ViewSize,
    thresholds: Thresholds,
    attached: Option<(OverlayState, ViewSize)>,
}

impl IndicatorView {
    fn new(name: &'static str, preferred: ViewSize, thresholds: Thresholds) -> Self {
        Self {
            name,
            preferred,
            thresholds,
            attached: None,
        }
    }

    fn attach(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> ViewSize {
        let size = measure(self.preferred, width_spec, height_spec);
        match self.attached.as_mut() {
            Some((_, current)) => *current = size,
            None => {
                // 指示器不绘制历史，窗口只保留一个样本
                let state = OverlayState::new(1, super::animation::DEFAULT_STEP, self.thresholds);
                self.attached = Some((state, size));
                crate::overlay_debug!(indicator = self.name, width = size.width, height = size.height, "Indicator attached");
            }
        }
        size
    }

    fn detach(&mut self) {
        if self.attached.take().is_some() {
            crate::overlay_debug!(indicator = self.name, "Indicator detached");
        }
    }

    fn state(&self) -> Option<&OverlayState> {
        self.attached.as_ref().map(|(state, _)| state)
    }

    /// 仅在已附加且尺寸非零时返回可更新的状态
    fn drawable_state_mut(&mut self) -> Option<&mut OverlayState> {
        match self.attached.as_mut() {
            Some((state, size)) if !size.is_empty() => Some(state),
            _ => {
                crate::overlay_warn!(indicator = self.name, "Indicator is detached or zero-sized, update skipped");
                None
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, text: &str, color: Color) {
        if let Some((_, size)) = self.attached.as_ref() {
            indicator::draw_line(canvas, *size, text, color);
        }
    }
}

/// FPS 指示器：`FPS: 60`
#[derive(Debug)]
pub struct FpsIndicator {
    view: IndicatorView,
}

impl FpsIndicator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            view: IndicatorView::new("fps", preferred::FPS, thresholds),
        }
    }

    pub fn attach(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> ViewSize {
        self.view.attach(width_spec, height_spec)
    }

    pub fn detach(&mut self) {
        self.view.detach();
    }

    pub fn state(&self) -> Option<&OverlayState> {
        self.view.state()
    }

    /// 更新帧率，返回是否需要重绘
    pub fn update_fps(&mut self, fps: f32) -> bool {
        let Some(state) = self.view.drawable_state_mut() else {
            return false;
        };
        let sample = PerformanceSample {
            fps,
            ..PerformanceSample::default()
        };
        state.update(sample);
        true
    }

    pub fn text(&self) -> Option<String> {
        self.state()
            .map(|s| format!("FPS: {}", round_half_up(s.sample().fps)))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let (Some(state), Some(text)) = (self.state(), self.text()) {
            self.view.draw(canvas, &text, tier_color(Metric::Fps, state.fps_tier()));
        }
    }
}

/// 电池温度指示器：`TEMP: 25°C`
#[derive(Debug)]
pub struct ThermalIndicator {
    view: IndicatorView,
}

impl ThermalIndicator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            view: IndicatorView::new("thermal", preferred::THERMAL, thresholds),
        }
    }

    pub fn attach(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> ViewSize {
        self.view.attach(width_spec, height_spec)
    }

    pub fn detach(&mut self) {
        self.view.detach();
    }

    pub fn state(&self) -> Option<&OverlayState> {
        self.view.state()
    }

    /// 更新温度；非有限读数保留上一次的值
    pub fn update_temperature(&mut self, celsius: f32) -> bool {
        let Some(state) = self.view.drawable_state_mut() else {
            return false;
        };
        let accepted = state.update_temperature(celsius);
        if !accepted {
            crate::telemetry_debug!(celsius, "Ignoring non-finite temperature reading");
        }
        accepted
    }

    pub fn text(&self) -> Option<String> {
        self.state()
            .map(|s| format!("TEMP: {}°C", round_half_up(s.sample().battery_temp_c)))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let (Some(state), Some(text)) = (self.state(), self.text()) {
            self.view
                .draw(canvas, &text, tier_color(Metric::Temperature, state.temperature_tier()));
        }
    }
}

/// 内存占用指示器：`RAM: 42% (3.2GB/7.6GB)`
#[derive(Debug)]
pub struct RamMeter {
    view: IndicatorView,
    last_snapshot: Option<MemorySnapshot>,
}

impl RamMeter {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            view: IndicatorView::new("ram", preferred::RAM, thresholds),
            last_snapshot: None,
        }
    }

    pub fn attach(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> ViewSize {
        self.view.attach(width_spec, height_spec)
    }

    pub fn detach(&mut self) {
        self.view.detach();
        self.last_snapshot = None;
    }

    pub fn state(&self) -> Option<&OverlayState> {
        self.view.state()
    }

    pub fn last_snapshot(&self) -> Option<MemorySnapshot> {
        self.last_snapshot
    }

    /// 查询系统内存并更新显示
    ///
    /// 未附加、零尺寸或查询失败时保留之前的统计，返回 false。
    pub fn update_ram_usage(&mut self, provider: &mut dyn SystemInfoProvider) -> bool {
        let Some(state) = self.view.drawable_state_mut() else {
            return false;
        };
        match provider.memory_snapshot() {
            Ok(snapshot) => {
                state.update_ram_usage(snapshot.usage_percent());
                self.last_snapshot = Some(snapshot);
                true
            }
            Err(e) => {
                crate::telemetry_warn!(error = %e, "Memory query failed, keeping previous RAM statistics");
                false
            }
        }
    }

    pub fn text(&self) -> Option<String> {
        let state = self.state()?;
        Some(match self.last_snapshot {
            Some(snapshot) => format_ram(state.ram_usage_percent(), &snapshot),
            None => "RAM: --".to_string(),
        })
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let (Some(state), Some(text)) = (self.state(), self.text()) {
            self.view.draw(canvas, &text, tier_color(Metric::RamUsage, state.ram_tier()));
        }
    }
}

/// 总内存不足 1 GB 时使用 MB 显示
fn format_ram(percent: f32, snapshot: &MemorySnapshot) -> String {
    let used_mb = snapshot.used_mb();
    let total_mb = snapshot.total_mb();
    let percent = round_half_up(percent);
    if total_mb >= 1024 {
        format!(
            "RAM: {}% ({:.1}GB/{:.1}GB)",
            percent,
            used_mb as f64 / 1024.0,
            total_mb as f64 / 1024.0
        )
    } else {
        format!("RAM: {}% ({}MB/{}MB)", percent, used_mb, total_mb)
    }
}
