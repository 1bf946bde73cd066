//! 配置管理模块
//!
//! 提供叠加层配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [overlay]
//! title = "Performance"
//! theme = "dark"            # 或 "light"
//! history_capacity = 120
//! animation_period_ms = 50
//! animation_step = 0.1
//!
//! [thresholds.fps]
//! good = 55.0
//! moderate = 45.0
//! poor = 30.0
//!
//! [thresholds.temperature]
//! cool = 20.0
//! neutral = 30.0
//! warm = 40.0
//! hot = 50.0
//!
//! [thresholds.ram]
//! good = 50.0
//! moderate = 75.0
//! poor = 90.0
//!
//! [host]
//! parent_width = 1280
//! parent_height = 720
//! frames = 600
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::overlay::style::Theme;
use crate::telemetry::severity::Thresholds;

/// 叠加层配置
///
/// 包含了叠加层及其宿主运行所需的所有配置项。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 叠加层显示配置
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// 严重等级阈值
    #[serde(default)]
    pub thresholds: Thresholds,

    /// 宿主（演示程序）配置
    #[serde(default)]
    pub host: HostConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 叠加层显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// 面板标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 配色主题
    #[serde(default = "default_theme")]
    pub theme: Theme,

    /// 帧时间历史容量（样本数，不是时间）
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// 动画节拍周期（毫秒）
    #[serde(default = "default_animation_period_ms")]
    pub animation_period_ms: u64,

    /// 每个节拍的相位增量
    #[serde(default = "default_animation_step")]
    pub animation_step: f32,
}

/// 宿主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// 父容器宽度
    #[serde(default = "default_parent_width")]
    pub parent_width: u32,

    /// 父容器高度
    #[serde(default = "default_parent_height")]
    pub parent_height: u32,

    /// 运行的 UI 帧数
    #[serde(default = "default_frames")]
    pub frames: u32,

    /// UI 帧间隔（毫秒）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// 模拟核心推送样本的间隔（毫秒）
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_title() -> String { "Performance".to_string() }
fn default_theme() -> Theme { Theme::Dark }
fn default_history_capacity() -> usize { crate::telemetry::window::DEFAULT_CAPACITY }
fn default_animation_period_ms() -> u64 { 50 }
fn default_animation_step() -> f32 { 0.1 }
fn default_parent_width() -> u32 { 1280 }
fn default_parent_height() -> u32 { 720 }
fn default_frames() -> u32 { 600 }
fn default_frame_interval_ms() -> u64 { 16 }
fn default_sample_interval_ms() -> u64 { 33 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "telemetry_overlay.log".to_string() }

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            theme: default_theme(),
            history_capacity: default_history_capacity(),
            animation_period_ms: default_animation_period_ms(),
            animation_step: default_animation_step(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            parent_width: default_parent_width(),
            parent_height: default_parent_height(),
            frames: default_frames(),
            frame_interval_ms: default_frame_interval_ms(),
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--light`: 使用浅色主题
    /// - `--frames <value>`: 运行的 UI 帧数
    /// - `--width <value>`: 父容器宽度
    /// - `--height <value>`: 父容器高度
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--light") {
            self.overlay.theme = Theme::Light;
        }

        if let Some(frames) = parse_flag(&args, "--frames") {
            self.host.frames = frames;
        }

        if let Some(width) = parse_flag(&args, "--width") {
            self.host.parent_width = width;
        }

        if let Some(height) = parse_flag(&args, "--height") {
            self.host.parent_height = height;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.overlay.history_capacity == 0 {
            return Err(invalid("overlay.history_capacity", "History capacity must be greater than 0"));
        }

        if self.overlay.animation_period_ms == 0 {
            return Err(invalid("overlay.animation_period_ms", "Animation period must be greater than 0"));
        }

        let step = self.overlay.animation_step;
        if !(step > 0.0 && step < 1.0) {
            return Err(invalid("overlay.animation_step", "Animation step must be in (0, 1)"));
        }

        if self.host.parent_width == 0 || self.host.parent_height == 0 {
            return Err(invalid("host.parent_width/height", "Parent dimensions must be greater than 0"));
        }

        if let Err(field) = self.thresholds.check_ordering() {
            return Err(invalid(field, "Threshold cutoffs must be strictly ordered"));
        }

        Ok(())
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1)?.parse().ok()
}

fn invalid(field: &str, reason: &str) -> super::error::OverlayError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.overlay.history_capacity, 120);
        assert_eq!(config.overlay.animation_period_ms, 50);
        assert_eq!(config.overlay.theme, Theme::Dark);
        assert_eq!(config.thresholds.fps.good, 55.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.overlay.history_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.overlay.animation_step = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thresholds.temperature.warm = 25.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [overlay]
            theme = "light"

            [thresholds.temperature]
            hot = 45.0
            "#,
        )
        .unwrap();

        assert_eq!(config.overlay.theme, Theme::Light);
        assert_eq!(config.overlay.history_capacity, 120);
        assert_eq!(config.thresholds.temperature.hot, 45.0);
        assert_eq!(config.thresholds.temperature.cool, 20.0);
        assert_eq!(config.host.parent_width, 1280);
    }

    #[test]
    fn test_parse_error() {
        assert!(Config::from_toml_str("[overlay\n").is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["telemetry_overlay", "--light", "--frames", "30", "--width", "bogus"]);
        assert_eq!(config.overlay.theme, Theme::Light);
        assert_eq!(config.host.frames, 30);
        assert_eq!(config.host.parent_width, 1280);
    }

    #[test]
    fn test_toml_roundtrip_keeps_thresholds() {
        let mut config = Config::default();
        config.thresholds.ram.poor = 85.0;
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.thresholds.ram.poor, 85.0);
    }
}
