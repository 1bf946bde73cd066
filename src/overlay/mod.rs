//! 性能叠加层视图模块
//!
//! 提供性能叠加层和单指标指示器的状态、动画、拖动与绘制。
//!
//! # 架构
//!
//! ```text
//! 模拟核心线程                      渲染 / UI 线程
//! SamplePublisher ──(seqlock)──> PerformanceOverlay::sync
//!                                    │
//!                      OverlayState ─┼─ AnimationDriver ← HostClock
//!                                    ├─ DragController  ← TouchEvent
//!                                    └─ panels::performance::draw → Canvas
//! ```

pub mod animation;
pub mod canvas;
pub mod drag;
pub mod egui_canvas;
pub mod indicators;
pub mod manager;
pub mod measure;
pub mod panels;
pub mod state;
pub mod style;

pub use animation::{AnimationDriver, AnimationPhase};
pub use canvas::{Canvas, DisplayList, DrawCommand, TextAlign};
pub use drag::{DragController, DragState, FixedBounds, ParentBounds, TouchEvent};
pub use egui_canvas::EguiCanvas;
pub use indicators::{FpsIndicator, RamMeter, ThermalIndicator};
pub use manager::PerformanceOverlay;
pub use measure::{MeasureSpec, ViewSize};
pub use state::OverlayState;
pub use style::{OverlayStyle, Palette, Theme};
