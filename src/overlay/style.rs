//! 叠加层配色与布局常量
//!
//! 严重等级到颜色的映射是绘制约定的一部分，运行时不可配置；
//! 主题只影响面板背景、标题和图表底色。

use serde::{Deserialize, Serialize};

use crate::core::config::OverlayConfig;
use crate::math::Color;
use crate::telemetry::severity::{Metric, SeverityTier};

/// 面板主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// 面板配色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub border_idle: Color,
    pub border_dragging: Color,
    pub title: Color,
    pub caption: Color,
    pub building: Color,
    pub graph_background: Color,
    pub graph_line: Color,
    pub grid: Color,
    pub reference_line: Color,
}

/// 图表填充的透明度（约 60/255）
pub const GRAPH_FILL_ALPHA: f32 = 60.0 / 255.0;

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let accent = Color::from_hex(0xFF9800);
        let dragging = Color::from_hex(0xFF5722);
        let graph_line = Color::from_hex(0x4CAF50);

        match theme {
            Theme::Dark => Self {
                background: Color::from_argb(0xCC000000),
                border_idle: accent,
                border_dragging: dragging,
                title: Color::WHITE,
                caption: Color::WHITE,
                building: accent,
                graph_background: Color::from_argb(0x40000000),
                graph_line,
                grid: Color::from_argb(0x40FFFFFF),
                reference_line: Color::from_argb(0x50FFFFFF),
            },
            Theme::Light => Self {
                background: Color::from_rgba_u8(245, 245, 245, 220),
                border_idle: accent,
                border_dragging: dragging,
                title: Color::from_rgba_u8(20, 20, 20, 255),
                caption: Color::from_rgba_u8(20, 20, 20, 255),
                building: accent,
                graph_background: Color::from_rgba_u8(220, 220, 220, 100),
                graph_line,
                grid: Color::from_argb(0x40000000),
                reference_line: Color::from_argb(0x50000000),
            },
        }
    }

    /// 图表线下方的半透明填充
    pub fn graph_fill(&self) -> Color {
        self.graph_line.with_alpha(GRAPH_FILL_ALPHA)
    }
}

/// 严重等级对应的显示颜色
pub fn tier_color(metric: Metric, tier: SeverityTier) -> Color {
    match (metric, tier) {
        (_, SeverityTier::Cool) => Color::from_hex(0x87CEEB),
        (Metric::Temperature, SeverityTier::Good) => Color::WHITE,
        (Metric::Temperature, SeverityTier::Moderate) => Color::from_hex(0xFFA500),
        (Metric::Temperature, SeverityTier::Poor) => Color::from_hex(0xFF4500),
        (Metric::Temperature, SeverityTier::Critical) => Color::from_hex(0xFF0000),
        (_, SeverityTier::Good) => Color::from_hex(0x4CAF50),
        (_, SeverityTier::Moderate) => Color::from_hex(0xFF9800),
        (_, SeverityTier::Poor) => Color::from_hex(0xFF5722),
        (_, SeverityTier::Critical) => Color::from_hex(0xF44336),
    }
}

/// 面板渲染样式
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub title: String,
    pub palette: Palette,
}

impl OverlayStyle {
    pub fn new(title: impl Into<String>, theme: Theme) -> Self {
        Self {
            title: title.into(),
            palette: Palette::for_theme(theme),
        }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.title.clone(), config.theme)
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::new("Performance", Theme::Dark)
    }
}

/// 布局常量（像素）
pub mod layout {
    pub const PANEL_INSET: f32 = 4.0;
    pub const PANEL_RADIUS: f32 = 12.0;
    pub const BORDER_WIDTH: f32 = 2.0;

    pub const PADDING: f32 = 16.0;
    pub const FIRST_BASELINE: f32 = PADDING + 20.0;
    pub const TITLE_LINE_HEIGHT: f32 = 22.0;
    pub const METRIC_LINE_HEIGHT: f32 = 18.0;
    pub const TITLE_TEXT_SIZE: f32 = 18.0;
    pub const SMALL_TEXT_SIZE: f32 = 14.0;

    pub const GRAPH_INSET_X: f32 = 20.0;
    pub const GRAPH_GAP: f32 = 8.0;
    pub const GRAPH_BOTTOM_INSET: f32 = 24.0;
    pub const GRAPH_RADIUS: f32 = 8.0;
    pub const GRAPH_LINE_WIDTH: f32 = 3.0;
    pub const GRID_LINE_WIDTH: f32 = 1.0;
    pub const GRID_BANDS: usize = 4;
    pub const CAPTION_OFFSET: f32 = 16.0;
    pub const REFERENCE_DASH: f32 = 4.0;
    pub const REFERENCE_GAP: f32 = 4.0;

    pub const INDICATOR_TEXT_INSET: f32 = 8.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_tier_colors() {
        assert_eq!(tier_color(Metric::Fps, SeverityTier::Good), Color::from_hex(0x4CAF50));
        assert_eq!(tier_color(Metric::RamUsage, SeverityTier::Critical), Color::from_hex(0xF44336));
    }

    #[test]
    fn test_temperature_tier_colors() {
        assert_eq!(tier_color(Metric::Temperature, SeverityTier::Cool), Color::from_hex(0x87CEEB));
        assert_eq!(tier_color(Metric::Temperature, SeverityTier::Good), Color::WHITE);
        assert_eq!(tier_color(Metric::Temperature, SeverityTier::Critical), Color::from_hex(0xFF0000));
    }

    #[test]
    fn test_graph_fill_is_translucent_line_color() {
        let palette = Palette::for_theme(Theme::Dark);
        let fill = palette.graph_fill();
        assert_eq!(fill.r, palette.graph_line.r);
        assert!(fill.a < 0.25);
    }

    #[test]
    fn test_themes_differ() {
        assert_ne!(
            Palette::for_theme(Theme::Dark).background,
            Palette::for_theme(Theme::Light).background
        );
    }
}
