//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//! 库代码只发出事件，订阅者（控制台 / 文件输出）由宿主程序安装。
//!
//! # 使用示例
//!
//! ```no_run
//! use telemetry_overlay::core::log;
//! use telemetry_overlay::core::config::LogLevel;
//!
//! // 仅控制台输出
//! log::init_logger(LogLevel::Info, false, None);
//!
//! // 结构化日志
//! tracing::info!(width = 280, height = 140, "Overlay attached");
//! ```

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::Path;

use super::config::LogLevel;

/// 默认日志文件名
const DEFAULT_LOG_FILE: &str = "telemetry_overlay.log";

/// 初始化日志系统
///
/// 必须在程序开始时调用一次。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "telemetry_overlay.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) {
    let filter = EnvFilter::new(filter_directive(level));

    if file_output {
        // 解析日志文件路径
        let log_path = log_file_path.unwrap_or(DEFAULT_LOG_FILE);
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);

        // 创建滚动文件 appender（每天滚动）
        let file_appender = RollingFileAppender::new(
            Rotation::DAILY,
            directory,
            filename
        );

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_ansi(false)  // 文件不需要 ANSI 颜色
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// 日志级别对应的 EnvFilter 指令
fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

/// 叠加层视图日志 - Info 级别
#[macro_export]
macro_rules! overlay_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "telemetry_overlay::overlay", $($arg)*)
    };
}

/// 叠加层视图日志 - Warn 级别
#[macro_export]
macro_rules! overlay_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "telemetry_overlay::overlay", $($arg)*)
    };
}

/// 叠加层视图日志 - Debug 级别
#[macro_export]
macro_rules! overlay_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "telemetry_overlay::overlay", $($arg)*)
    };
}

/// 遥测数据日志 - Warn 级别
#[macro_export]
macro_rules! telemetry_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "telemetry_overlay::telemetry", $($arg)*)
    };
}

/// 遥测数据日志 - Debug 级别
#[macro_export]
macro_rules! telemetry_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "telemetry_overlay::telemetry", $($arg)*)
    };
}
