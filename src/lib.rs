//! telemetry_overlay - 实时性能遥测叠加层
//!
//! 在模拟画面上方显示帧率、帧时间、模拟速度、着色器编译、电池温度和
//! 内存占用。样本由模拟核心线程推送，叠加层在渲染 / UI 线程上合入、
//! 动画和绘制，两侧互不阻塞。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（配置、日志、错误处理、宿主时钟）
//! - `math`: 颜色、矩形和二维向量
//! - `telemetry`: 样本、滚动窗口、严重等级、跨线程交接、系统信息
//! - `overlay`: 叠加层状态、动画、拖动、绘制后端
//!
//! # 使用示例
//!
//! ```no_run
//! use telemetry_overlay::core::{Config, ManualClock};
//! use telemetry_overlay::overlay::{DisplayList, MeasureSpec, PerformanceOverlay};
//!
//! let config = Config::default();
//! let mut overlay = PerformanceOverlay::new(&config.overlay, config.thresholds);
//! overlay.attach(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
//!
//! // 模拟核心线程
//! let publisher = overlay.publisher();
//! std::thread::spawn(move || publisher.update_performance_stats(60.0, 16.6, 100.0, 2));
//!
//! // UI 线程
//! let mut clock = ManualClock::new();
//! overlay.sync(&mut clock);
//! let mut list = DisplayList::new();
//! overlay.draw(&mut list);
//! ```

pub mod core;
pub mod math;
pub mod overlay;
pub mod telemetry;
