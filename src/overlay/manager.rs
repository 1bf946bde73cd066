//! 性能叠加层视图
//!
//! 把交接槽位、状态、动画驱动器和拖动控制器组合成一个视图对象。
//! 除 [`PerformanceOverlay::publisher`] 返回的发布句柄外，所有方法都必须
//! 在渲染 / UI 线程上调用。
//!
//! 生命周期：
//! - `attach` 按布局约束确定尺寸并创建状态
//! - 每帧 `sync` 合入最新样本，`on_tick` 处理到期的动画回调
//! - `detach` 停止动画并释放状态，之后到达的样本和回调都被丢弃

use std::sync::Arc;

use crate::core::clock::{HostClock, TickTicket};
use crate::core::config::OverlayConfig;
use crate::math::Vector2;
use crate::telemetry::{PerformanceSample, SamplePublisher, SampleSlot, Thresholds};

use super::animation::AnimationDriver;
use super::canvas::Canvas;
use super::drag::{DragController, ParentBounds, TouchEvent};
use super::measure::{measure, preferred, MeasureSpec, ViewSize};
use super::panels::performance;
use super::state::OverlayState;
use super::style::OverlayStyle;

/// 附加期间才存在的视图数据
#[derive(Debug)]
struct Attached {
    state: OverlayState,
    size: ViewSize,
    driver: AnimationDriver,
    drag: DragController,
    stats_version: u64,
    temperature_version: u64,
}

/// 性能叠加层（着色器编译叠加层）
pub struct PerformanceOverlay {
    history_capacity: usize,
    animation_period_ms: u64,
    animation_step: f32,
    thresholds: Thresholds,
    style: OverlayStyle,

    slot: Arc<SampleSlot>,
    publisher: SamplePublisher,

    attached: Option<Attached>,
    redraw_requested: bool,
}

impl PerformanceOverlay {
    pub fn new(config: &OverlayConfig, thresholds: Thresholds) -> Self {
        let (slot, publisher) = crate::telemetry::channel();
        Self {
            history_capacity: config.history_capacity,
            animation_period_ms: config.animation_period_ms,
            animation_step: config.animation_step,
            thresholds,
            style: OverlayStyle::from_config(config),
            slot,
            publisher,
            attached: None,
            redraw_requested: false,
        }
    }

    /// 生产者线程使用的发布句柄
    pub fn publisher(&self) -> SamplePublisher {
        self.publisher.clone()
    }

    /// 附加到视图树
    ///
    /// 已附加时只重新计算尺寸，保留状态。
    pub fn attach(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> ViewSize {
        let size = measure(preferred::PERFORMANCE, width_spec, height_spec);

        match self.attached.as_mut() {
            Some(attached) => attached.size = size,
            None => {
                // 附加前积压的数据不属于本次生命周期；写入中途的数据留给下一次 sync
                let (stats_version, temperature_version) = self
                    .slot
                    .read_latest()
                    .map_or((0, 0), |s| (s.stats_version, s.temperature_version));
                self.slot.take_redraw();

                self.attached = Some(Attached {
                    state: OverlayState::new(self.history_capacity, self.animation_step, self.thresholds),
                    size,
                    driver: AnimationDriver::new(self.animation_period_ms),
                    drag: DragController::new(),
                    stats_version,
                    temperature_version,
                });
                crate::overlay_info!(width = size.width, height = size.height, "Performance overlay attached");
            }
        }
        if size.is_empty() {
            crate::overlay_warn!("Performance overlay measured to zero size, drawing is disabled");
        }
        self.redraw_requested = true;
        size
    }

    /// 从视图树分离：停止动画链并释放状态
    pub fn detach(&mut self) {
        if let Some(mut attached) = self.attached.take() {
            attached.driver.stop();
            crate::overlay_info!("Performance overlay detached");
        }
        self.redraw_requested = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn size(&self) -> Option<ViewSize> {
        self.attached.as_ref().map(|a| a.size)
    }

    pub fn state(&self) -> Option<&OverlayState> {
        self.attached.as_ref().map(|a| &a.state)
    }

    pub fn position(&self) -> Vector2 {
        self.attached
            .as_ref()
            .map(|a| a.drag.position())
            .unwrap_or_else(Vector2::zeros)
    }

    pub fn is_animation_running(&self) -> bool {
        self.attached.as_ref().is_some_and(|a| a.driver.is_running())
    }

    /// 合入生产者发布的最新样本
    ///
    /// 没有新数据时什么也不做，上一帧的状态原样重绘。生产者停在写入中途时
    /// 保留当前状态并重新挂起重绘请求，下一帧再试。返回是否需要重绘。
    pub fn sync(&mut self, clock: &mut dyn HostClock) -> bool {
        let producer_redraw = self.slot.take_redraw();
        let Some(attached) = self.attached.as_mut() else {
            return false;
        };
        if !producer_redraw {
            return false;
        }

        let Some(snapshot) = self.slot.read_latest() else {
            crate::telemetry_debug!("Producer is mid-write, keeping previous sample");
            self.slot.request_redraw();
            return false;
        };
        let mut changed = false;

        if snapshot.stats_version != attached.stats_version {
            attached.stats_version = snapshot.stats_version;
            attached.temperature_version = snapshot.temperature_version;
            apply_sample(attached, snapshot.sample, clock);
            changed = true;
        } else if snapshot.temperature_version != attached.temperature_version {
            attached.temperature_version = snapshot.temperature_version;
            changed = attached.state.update_temperature(snapshot.sample.battery_temp_c);
        }

        self.redraw_requested |= changed;
        changed
    }

    /// 在 UI 线程上直接合入一个样本
    pub fn update(&mut self, sample: PerformanceSample, clock: &mut dyn HostClock) {
        if let Some(attached) = self.attached.as_mut() {
            apply_sample(attached, sample, clock);
            self.redraw_requested = true;
        } else {
            crate::overlay_debug!("Sample delivered to detached performance overlay, discarded");
        }
    }

    /// 处理到期的动画回调
    pub fn on_tick(&mut self, ticket: TickTicket, clock: &mut dyn HostClock) -> bool {
        let Some(attached) = self.attached.as_mut() else {
            return false;
        };
        let advanced = attached.driver.on_tick(ticket, clock, attached.state.phase_mut());
        self.redraw_requested |= advanced;
        advanced
    }

    /// 分发触摸事件
    pub fn on_touch_event(&mut self, event: TouchEvent, parent: &dyn ParentBounds) -> bool {
        let Some(attached) = self.attached.as_mut() else {
            return false;
        };
        let changed = attached.drag.on_touch_event(event, attached.size, parent);
        attached.state.set_position(attached.drag.position());
        attached.state.set_dragging(attached.drag.is_dragging());
        self.redraw_requested |= changed;
        changed
    }

    /// 回到父视图左上角
    pub fn reset_position(&mut self) {
        if let Some(attached) = self.attached.as_mut() {
            attached.drag.reset_position();
            attached.state.set_position(attached.drag.position());
            attached.state.set_dragging(false);
            self.redraw_requested = true;
        }
    }

    /// 取出并清除重绘请求
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// 绘制当前状态；未附加或零尺寸时不绘制
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(attached) = self.attached.as_ref() {
            performance::draw(canvas, &attached.state, attached.size, &self.style);
        }
    }
}

fn apply_sample(attached: &mut Attached, sample: PerformanceSample, clock: &mut dyn HostClock) {
    if sample.is_anomalous() {
        crate::telemetry_debug!(?sample, "Sanitizing anomalous sample");
    }
    attached.state.update(sample);

    if attached.state.is_animating() {
        // 已在运行时为空操作；回调丢失时会重新安排
        attached.driver.start(clock);
    } else {
        attached.driver.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::overlay::canvas::DisplayList;
    use crate::overlay::drag::FixedBounds;
    use std::thread;

    fn overlay() -> PerformanceOverlay {
        let mut overlay = PerformanceOverlay::new(&OverlayConfig::default(), Thresholds::default());
        overlay.attach(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        overlay
    }

    fn drive(overlay: &mut PerformanceOverlay, clock: &mut ManualClock, ms: u64) {
        for ticket in clock.advance_by(ms) {
            overlay.on_tick(ticket, clock);
        }
    }

    #[test]
    fn test_sync_folds_latest_sample() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();
        let publisher = overlay.publisher();

        publisher.update_performance_stats(30.0, 33.0, 50.0, 0);
        publisher.update_performance_stats(60.0, 16.0, 100.0, 0);
        assert!(overlay.sync(&mut clock));

        let state = overlay.state().unwrap();
        assert_eq!(state.sample().fps, 60.0);
        // 只有最新值进入窗口
        assert_eq!(state.window().len(), 1);

        // 没有新数据时不重复合入
        assert!(!overlay.sync(&mut clock));
        assert_eq!(overlay.state().unwrap().window().len(), 1);
    }

    #[test]
    fn test_temperature_update_does_not_repeat_frame_time() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();
        let publisher = overlay.publisher();

        publisher.update_performance_stats(60.0, 16.0, 100.0, 0);
        overlay.sync(&mut clock);
        publisher.update_temperature(42.0);
        assert!(overlay.sync(&mut clock));

        let state = overlay.state().unwrap();
        assert_eq!(state.window().len(), 1);
        assert_eq!(state.sample().battery_temp_c, 42.0);
    }

    #[test]
    fn test_sync_keeps_state_while_producer_stalled() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();
        overlay.publisher().update_performance_stats(60.0, 16.0, 100.0, 0);
        assert!(overlay.sync(&mut clock));

        let start = overlay.slot.begin_write();
        overlay.slot.request_redraw();
        assert!(!overlay.sync(&mut clock));
        assert!(!overlay.sync(&mut clock));
        let state = overlay.state().unwrap();
        assert_eq!(state.sample().fps, 60.0);
        assert_eq!(state.window().len(), 1);

        overlay.slot.end_write(start);
        // 写入完成后序列号前进，样本重新合入
        assert!(overlay.sync(&mut clock));
        assert_eq!(overlay.state().unwrap().window().len(), 2);
    }

    #[test]
    fn test_animation_follows_shader_activity() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();

        overlay.update(PerformanceSample::new(60.0, 16.0, 100.0, 2, 30.0), &mut clock);
        assert!(overlay.is_animation_running());
        drive(&mut overlay, &mut clock, 50);
        drive(&mut overlay, &mut clock, 50);
        assert!((overlay.state().unwrap().animation_phase() - 0.2).abs() < 1e-5);

        overlay.update(PerformanceSample::new(60.0, 16.0, 100.0, 0, 30.0), &mut clock);
        assert!(!overlay.is_animation_running());
        drive(&mut overlay, &mut clock, 50);
        assert_eq!(clock.pending_len(), 0);
    }

    #[test]
    fn test_detach_halts_ticks() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();

        overlay.update(PerformanceSample::new(60.0, 16.0, 100.0, 1, 30.0), &mut clock);
        overlay.detach();

        let due = clock.advance_by(50);
        assert_eq!(due.len(), 1);
        for ticket in due {
            assert!(!overlay.on_tick(ticket, &mut clock));
        }
        assert_eq!(clock.pending_len(), 0);
        assert!(overlay.state().is_none());

        // 分离后发布的样本被丢弃
        overlay.publisher().update_performance_stats(60.0, 16.0, 100.0, 0);
        assert!(!overlay.sync(&mut clock));
    }

    #[test]
    fn test_drag_and_reset() {
        let parent = FixedBounds::new(1280.0, 720.0);
        let mut overlay = overlay();

        overlay.on_touch_event(TouchEvent::Down { x: 10.0, y: 10.0 }, &parent);
        overlay.on_touch_event(TouchEvent::Move { x: 110.0, y: 60.0 }, &parent);
        assert_eq!(overlay.position(), Vector2::new(100.0, 50.0));
        assert!(overlay.state().unwrap().is_dragging());

        overlay.reset_position();
        assert_eq!(overlay.position(), Vector2::zeros());
        assert!(!overlay.state().unwrap().is_dragging());
    }

    #[test]
    fn test_redraw_requests() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();
        assert!(overlay.take_redraw_request());
        assert!(!overlay.take_redraw_request());

        overlay.publisher().update_performance_stats(60.0, 16.0, 100.0, 0);
        overlay.sync(&mut clock);
        assert!(overlay.take_redraw_request());
    }

    #[test]
    fn test_draw_uses_latest_state() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();
        overlay.publisher().update_performance_stats(45.0, 22.0, 75.0, 0);
        overlay.sync(&mut clock);

        let mut list = DisplayList::new();
        overlay.draw(&mut list);
        assert!(list.find_text("FPS: 45").is_some());

        overlay.detach();
        let mut list = DisplayList::new();
        overlay.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_producer_thread() {
        let mut clock = ManualClock::new();
        let mut overlay = overlay();
        let publisher = overlay.publisher();

        let producer = thread::spawn(move || {
            for i in 1..=500u32 {
                publisher.update_performance_stats(60.0, 16.0 + (i % 4) as f32, 100.0, i % 2);
            }
        });

        let mut synced = 0;
        while !producer.is_finished() {
            if overlay.sync(&mut clock) {
                synced += 1;
            }
        }
        producer.join().unwrap();
        overlay.sync(&mut clock);

        let state = overlay.state().unwrap();
        assert!(state.window().len() <= state.window().capacity());
        assert!(synced <= 500);
    }
}
