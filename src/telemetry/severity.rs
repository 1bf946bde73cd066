//! 严重等级分类
//!
//! 将指标值映射到离散的严重等级，用于选择显示颜色。
//! 分类是纯函数；阈值是可配置的常量，默认值与 Android 叠加层一致。

use serde::{Deserialize, Serialize};

/// 被分类的指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// 帧率（越高越好）
    Fps,
    /// 电池温度，摄氏度（越低越好）
    Temperature,
    /// 内存占用百分比（越低越好）
    RamUsage,
}

/// 严重等级
///
/// `Cool` 只用于温度指标；温度的"正常 / 温热 / 过热"分别对应
/// `Good` / `Moderate` / `Poor`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeverityTier {
    Cool,
    Good,
    Moderate,
    Poor,
    Critical,
}

/// 帧率阈值（包含的下界，从高等级开始判断）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FpsThresholds {
    #[serde(default = "default_fps_good")]
    pub good: f32,
    #[serde(default = "default_fps_moderate")]
    pub moderate: f32,
    #[serde(default = "default_fps_poor")]
    pub poor: f32,
}

/// 温度阈值（不包含的上界）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureThresholds {
    #[serde(default = "default_temp_cool")]
    pub cool: f32,
    #[serde(default = "default_temp_neutral")]
    pub neutral: f32,
    #[serde(default = "default_temp_warm")]
    pub warm: f32,
    #[serde(default = "default_temp_hot")]
    pub hot: f32,
}

/// 内存占用阈值（不包含的上界）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RamThresholds {
    #[serde(default = "default_ram_good")]
    pub good: f32,
    #[serde(default = "default_ram_moderate")]
    pub moderate: f32,
    #[serde(default = "default_ram_poor")]
    pub poor: f32,
}

/// 全部阈值表
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub fps: FpsThresholds,
    #[serde(default)]
    pub temperature: TemperatureThresholds,
    #[serde(default)]
    pub ram: RamThresholds,
}

// 默认值函数
fn default_fps_good() -> f32 { 55.0 }
fn default_fps_moderate() -> f32 { 45.0 }
fn default_fps_poor() -> f32 { 30.0 }
fn default_temp_cool() -> f32 { 20.0 }
fn default_temp_neutral() -> f32 { 30.0 }
fn default_temp_warm() -> f32 { 40.0 }
fn default_temp_hot() -> f32 { 50.0 }
fn default_ram_good() -> f32 { 50.0 }
fn default_ram_moderate() -> f32 { 75.0 }
fn default_ram_poor() -> f32 { 90.0 }

impl Default for FpsThresholds {
    fn default() -> Self {
        Self {
            good: default_fps_good(),
            moderate: default_fps_moderate(),
            poor: default_fps_poor(),
        }
    }
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            cool: default_temp_cool(),
            neutral: default_temp_neutral(),
            warm: default_temp_warm(),
            hot: default_temp_hot(),
        }
    }
}

impl Default for RamThresholds {
    fn default() -> Self {
        Self {
            good: default_ram_good(),
            moderate: default_ram_moderate(),
            poor: default_ram_poor(),
        }
    }
}

impl FpsThresholds {
    pub fn classify(&self, fps: f32) -> SeverityTier {
        if fps >= self.good {
            SeverityTier::Good
        } else if fps >= self.moderate {
            SeverityTier::Moderate
        } else if fps >= self.poor {
            SeverityTier::Poor
        } else {
            SeverityTier::Critical
        }
    }
}

impl TemperatureThresholds {
    pub fn classify(&self, celsius: f32) -> SeverityTier {
        if celsius < self.cool {
            SeverityTier::Cool
        } else if celsius < self.neutral {
            SeverityTier::Good
        } else if celsius < self.warm {
            SeverityTier::Moderate
        } else if celsius < self.hot {
            SeverityTier::Poor
        } else {
            SeverityTier::Critical
        }
    }
}

impl RamThresholds {
    pub fn classify(&self, percent: f32) -> SeverityTier {
        if percent < self.good {
            SeverityTier::Good
        } else if percent < self.moderate {
            SeverityTier::Moderate
        } else if percent < self.poor {
            SeverityTier::Poor
        } else {
            SeverityTier::Critical
        }
    }
}

impl Thresholds {
    /// 按指标分类
    ///
    /// NaN 不满足任何比较，落入 `Critical`。
    pub fn classify(&self, metric: Metric, value: f32) -> SeverityTier {
        match metric {
            Metric::Fps => self.fps.classify(value),
            Metric::Temperature => self.temperature.classify(value),
            Metric::RamUsage => self.ram.classify(value),
        }
    }

    /// 检查每张表的阈值是否严格有序，返回第一个违规的字段名
    pub fn check_ordering(&self) -> std::result::Result<(), &'static str> {
        let f = &self.fps;
        if !(f.good > f.moderate && f.moderate > f.poor) {
            return Err("thresholds.fps");
        }
        let t = &self.temperature;
        if !(t.cool < t.neutral && t.neutral < t.warm && t.warm < t.hot) {
            return Err("thresholds.temperature");
        }
        let r = &self.ram;
        if !(r.good < r.moderate && r.moderate < r.poor) {
            return Err("thresholds.ram");
        }
        Ok(())
    }
}

/// 使用默认阈值分类
pub fn classify(metric: Metric, value: f32) -> SeverityTier {
    Thresholds::default().classify(metric, value)
}
