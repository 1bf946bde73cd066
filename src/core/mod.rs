//! 核心功能模块
//!
//! 本模块提供叠加层的基础设施：配置管理、日志、错误处理和宿主时钟。
//! 这些模块与具体的绘制后端无关。
//!
//! # 模块组织
//!
//! - `config`：配置管理，支持从 TOML 文件加载叠加层设置
//! - `log`：日志系统，基于 `tracing` 的结构化日志
//! - `error`：错误处理，定义统一的错误类型
//! - `clock`：宿主时钟抽象，驱动协作式动画节拍

pub mod clock;
pub mod config;
pub mod error;
pub mod log;

// 重新导出常用类型，方便使用
pub use clock::{HostClock, ManualClock, TickTicket};
pub use config::Config;
pub use error::{OverlayError, Result};
