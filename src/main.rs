//! telemetry_overlay - 无窗口演示宿主
//!
//! 模拟一个运行中的模拟器：独立线程按不规则节奏推送性能样本，
//! UI 循环每帧合入样本、派发动画回调、回放一段脚本化拖动，
//! 并通过 egui 绘制叠加层（不创建窗口，只生成绘制形状）。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 浅色主题，运行 300 帧，父容器 800x600
//! cargo run -- --light --frames 300 --width 800 --height 600
//! ```
//!
//! # 线程模型
//!
//! ```text
//! ┌────────────────┐  SamplePublisher   ┌─────────────────────┐
//! │ emulation 线程 │ ─────────────────> │ UI 循环 (main 线程) │
//! │  合成样本       │   最新值优先      │ sync / tick / draw  │
//! └────────────────┘                    └─────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use tracing::{debug, error, info};

use telemetry_overlay::core::{log, Config, ManualClock};
use telemetry_overlay::math::Vector2;
use telemetry_overlay::overlay::{
    EguiCanvas, FixedBounds, FpsIndicator, MeasureSpec, ParentBounds, PerformanceOverlay, RamMeter,
    ThermalIndicator, TouchEvent, ViewSize,
};
use telemetry_overlay::telemetry::{FrameCounter, PerformanceSample, SamplePublisher, SysinfoProvider};

/// 内存查询间隔（帧）
const RAM_REFRESH_FRAMES: u32 = 30;

/// 指示器与父容器边缘的间距
const INDICATOR_MARGIN: f32 = 8.0;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 验证配置
/// 4. 初始化日志系统
/// 5. 运行宿主循环
fn main() {
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args());

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "Telemetry overlay host starting");
    info!(
        parent_width = config.host.parent_width,
        parent_height = config.host.parent_height,
        frames = config.host.frames,
        theme = ?config.overlay.theme,
        "Host configuration"
    );

    if let Err(e) = run(&config) {
        error!("Host loop failed: {:#}", e);
        eprintln!("Host loop failed: {:#}", e);
        std::process::exit(1);
    }
}

/// 叠加层及指示器集合
struct Overlays {
    performance: PerformanceOverlay,
    fps: FpsIndicator,
    thermal: ThermalIndicator,
    ram: RamMeter,
    fps_size: ViewSize,
    thermal_size: ViewSize,
    ram_size: ViewSize,
}

impl Overlays {
    fn attach(config: &Config, parent: &FixedBounds) -> Self {
        let mut performance = PerformanceOverlay::new(&config.overlay, config.thresholds);
        performance.attach(MeasureSpec::AtMost(parent.width()), MeasureSpec::AtMost(parent.height()));

        let mut fps = FpsIndicator::new(config.thresholds);
        let mut thermal = ThermalIndicator::new(config.thresholds);
        let mut ram = RamMeter::new(config.thresholds);
        let fps_size = fps.attach(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        let thermal_size = thermal.attach(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        let ram_size = ram.attach(MeasureSpec::Unspecified, MeasureSpec::Unspecified);

        Self {
            performance,
            fps,
            thermal,
            ram,
            fps_size,
            thermal_size,
            ram_size,
        }
    }

    fn detach(&mut self) {
        self.performance.detach();
        self.fps.detach();
        self.thermal.detach();
        self.ram.detach();
    }
}

/// 宿主循环
fn run(config: &Config) -> anyhow::Result<()> {
    let parent = FixedBounds::new(config.host.parent_width as f32, config.host.parent_height as f32);
    let mut overlays = Overlays::attach(config, &parent);
    let mut clock = ManualClock::new();
    let mut provider = SysinfoProvider::new();

    let running = Arc::new(AtomicBool::new(true));
    let producer = spawn_emulation(
        overlays.performance.publisher(),
        Arc::clone(&running),
        Duration::from_millis(config.host.sample_interval_ms),
    )?;

    let ctx = egui::Context::default();
    let start = Instant::now();
    let frame_interval = Duration::from_millis(config.host.frame_interval_ms);
    let mut frame_counter = FrameCounter::new();
    let mut painted_frames = 0u32;

    info!("Entering host loop...");
    for frame in 0..config.host.frames {
        let now_ms = start.elapsed().as_millis() as u64;
        for ticket in clock.advance_to(now_ms) {
            overlays.performance.on_tick(ticket, &mut clock);
        }

        let mut indicators_changed = false;
        if overlays.performance.sync(&mut clock) {
            if let Some(state) = overlays.performance.state() {
                let sample = *state.sample();
                indicators_changed |= overlays.fps.update_fps(sample.fps);
                indicators_changed |= overlays.thermal.update_temperature(sample.battery_temp_c);
            }
        }

        if frame % RAM_REFRESH_FRAMES == 0 {
            indicators_changed |= overlays.ram.update_ram_usage(&mut provider);
        }

        if let Some(event) = scripted_touch(frame) {
            overlays.performance.on_touch_event(event, &parent);
        }
        if frame == config.host.frames.saturating_sub(config.host.frames / 4) {
            debug!(position = ?overlays.performance.position(), "Resetting overlay position");
            overlays.performance.reset_position();
        }

        // 总是取出请求，避免挂起的请求拖到下一帧
        if overlays.performance.take_redraw_request() | indicators_changed {
            let shapes = paint(&ctx, &overlays, &parent);
            painted_frames += 1;
            debug!(frame, shapes, "Overlay repainted");
        }

        frame_counter.record_frame();
        thread::sleep(frame_interval);
    }

    running.store(false, Ordering::Release);
    producer
        .join()
        .map_err(|_| anyhow!("Emulation thread panicked"))?;

    if let Some(state) = overlays.performance.state() {
        let stats = state.window().stats();
        info!(
            samples = state.window().len(),
            min_ms = stats.min,
            avg_ms = stats.avg,
            max_ms = stats.max,
            "Frame time window"
        );
    }
    overlays.detach();

    info!(
        frames = config.host.frames,
        painted_frames,
        ui_fps = frame_counter.fps(),
        "Host loop finished"
    );
    Ok(())
}

/// 启动合成样本的模拟线程
fn spawn_emulation(
    publisher: SamplePublisher,
    running: Arc<AtomicBool>,
    interval: Duration,
) -> anyhow::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("emulation".to_string())
        .spawn(move || {
            let mut tick = 0u32;
            while running.load(Ordering::Acquire) {
                publisher.publish(synthetic_sample(tick));
                tick = tick.wrapping_add(1);

                // 不规则节奏：每隔几个样本出现一次较长间隔
                let pause = if tick % 7 == 0 { interval * 3 } else { interval };
                thread::sleep(pause);
            }
        })
        .context("Failed to spawn emulation thread")
}

/// 合成的模拟器样本：帧时间周期性波动，周期性出现着色器编译高峰
fn synthetic_sample(tick: u32) -> PerformanceSample {
    let t = tick as f32 * 0.15;
    let building = (tick / 40) % 3 == 1;

    let mut frame_time_ms = 16.2 + 2.5 * t.sin();
    if building {
        frame_time_ms += 12.0;
    }
    let fps = 1000.0 / frame_time_ms;
    let speed = (fps / 60.0 * 100.0).min(100.0);
    let shaders = if building { 1 + tick % 4 } else { 0 };
    let temperature = 24.0 + (tick as f32 * 0.02).min(22.0);

    PerformanceSample::new(fps, frame_time_ms, speed, shaders, temperature)
}

/// 脚本化拖动：按下、向右下移动 60 帧、抬起
fn scripted_touch(frame: u32) -> Option<TouchEvent> {
    const DOWN: u32 = 120;
    const MOVES: u32 = 60;

    match frame {
        DOWN => Some(TouchEvent::Down { x: 20.0, y: 20.0 }),
        f if f > DOWN && f <= DOWN + MOVES => {
            let step = (f - DOWN) as f32;
            Some(TouchEvent::Move {
                x: 20.0 + step * 6.0,
                y: 20.0 + step * 3.0,
            })
        }
        f if f == DOWN + MOVES + 1 => Some(TouchEvent::Up),
        _ => None,
    }
}

/// 用 egui 绘制一帧，返回生成的形状数
fn paint(ctx: &egui::Context, overlays: &Overlays, parent: &FixedBounds) -> usize {
    let screen = egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(parent.width(), parent.height()),
    );
    let input = egui::RawInput {
        screen_rect: Some(screen),
        ..Default::default()
    };

    let output = ctx.run(input, |ctx| {
        let painter = ctx.layer_painter(egui::LayerId::background());

        let mut canvas = EguiCanvas::new(&painter, overlays.performance.position());
        overlays.performance.draw(&mut canvas);

        // 指示器沿右上角纵向排列
        let right = parent.width() - INDICATOR_MARGIN;
        let mut y = INDICATOR_MARGIN;

        let mut canvas = EguiCanvas::new(&painter, Vector2::new(right - overlays.ram_size.width, y));
        overlays.ram.draw(&mut canvas);
        y += overlays.ram_size.height + INDICATOR_MARGIN;

        let mut canvas = EguiCanvas::new(&painter, Vector2::new(right - overlays.thermal_size.width, y));
        overlays.thermal.draw(&mut canvas);
        y += overlays.thermal_size.height + INDICATOR_MARGIN;

        let mut canvas = EguiCanvas::new(&painter, Vector2::new(right - overlays.fps_size.width, y));
        overlays.fps.draw(&mut canvas);
    });

    output.shapes.len()
}
