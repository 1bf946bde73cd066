//! 性能遥测模块
//!
//! 样本类型、滚动窗口、严重等级分类、跨线程交接和系统信息查询。
//! 本模块不涉及任何绘制。

pub mod handoff;
pub mod metrics;
pub mod sample;
pub mod severity;
pub mod system;
pub mod window;

pub use handoff::{channel, SamplePublisher, SampleSlot, SampleSnapshot};
pub use metrics::FrameCounter;
pub use sample::PerformanceSample;
pub use severity::{classify, Metric, SeverityTier, Thresholds};
pub use system::{MemorySnapshot, SysinfoProvider, SystemInfoProvider};
pub use window::{RollingWindow, WindowStats};
