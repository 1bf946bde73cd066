//! 错误处理模块
//!
//! 定义叠加层内部使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 错误只在内部传递：叠加层对外的操作都是全函数，
//!   失败时退化为"显示上一次的有效值"

use std::fmt;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, OverlayError>;

/// 叠加层的错误类型
#[derive(Debug)]
pub enum OverlayError {
    /// 配置错误
    Config(ConfigError),

    /// 系统信息查询错误
    SystemInfo(SystemInfoError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),

    /// 初始化错误
    Initialization(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 系统信息相关的错误
#[derive(Debug)]
pub enum SystemInfoError {
    /// 系统服务不可用
    Unavailable(String),

    /// 查询结果不合法（例如总内存为 0）
    InvalidSnapshot { total_bytes: u64, available_bytes: u64 },
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::Config(e) => write!(f, "Configuration error: {}", e),
            OverlayError::SystemInfo(e) => write!(f, "System info error: {}", e),
            OverlayError::Io(e) => write!(f, "IO error: {}", e),
            OverlayError::Log(msg) => write!(f, "Log error: {}", msg),
            OverlayError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for SystemInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemInfoError::Unavailable(msg) => write!(f, "System service unavailable: {}", msg),
            SystemInfoError::InvalidSnapshot { total_bytes, available_bytes } => write!(
                f,
                "Invalid memory snapshot (total: {} bytes, available: {} bytes)",
                total_bytes, available_bytes
            ),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::Io(e) => Some(e),
            OverlayError::Config(e) => Some(e),
            OverlayError::SystemInfo(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for SystemInfoError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        OverlayError::Io(err)
    }
}

impl From<ConfigError> for OverlayError {
    fn from(err: ConfigError) -> Self {
        OverlayError::Config(err)
    }
}

impl From<SystemInfoError> for OverlayError {
    fn from(err: SystemInfoError) -> Self {
        OverlayError::SystemInfo(err)
    }
}
