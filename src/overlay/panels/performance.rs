//! 性能叠加层面板
//!
//! 绘制顺序固定：背景面板、边框、标题（同一行右侧是温度）、
//! FPS / 帧时间 / 速度三行指标、着色器编译状态行（仅在编译中）、帧时间图表。

use crate::math::{RectF, Vector2};
use crate::overlay::animation::dot_count;
use crate::overlay::canvas::{Canvas, TextAlign};
use crate::overlay::measure::ViewSize;
use crate::overlay::state::OverlayState;
use crate::overlay::style::{layout, tier_color, OverlayStyle};
use crate::telemetry::Metric;

use super::{graph, round_half_up};

/// 着色器编译状态文本，末尾点数随动画相位循环
pub fn building_text(shaders_building: u32, phase: f32) -> String {
    let dots = dot_count(phase);
    let suffix = if dots == 0 {
        String::new()
    } else {
        format!(" {}", ".".repeat(dots))
    };
    format!("Building: {} shader(s){}", shaders_building, suffix)
}

/// 标题行右侧的温度文本
pub fn temperature_text(celsius: f32) -> String {
    format!("TEMP: {}°C", round_half_up(celsius))
}

/// 渲染性能面板
///
/// 只读取状态；相同状态下重复调用产生完全相同的绘制命令。
pub fn draw(canvas: &mut dyn Canvas, state: &OverlayState, size: ViewSize, style: &OverlayStyle) {
    if size.is_empty() {
        return;
    }
    let palette = &style.palette;
    let sample = state.sample();

    let panel = RectF::from_size(size.width, size.height).inset(layout::PANEL_INSET);
    canvas.fill_round_rect(panel, layout::PANEL_RADIUS, palette.background);

    let border = if state.is_dragging() {
        palette.border_dragging
    } else {
        palette.border_idle
    };
    canvas.stroke_round_rect(panel, layout::PANEL_RADIUS, layout::BORDER_WIDTH, border);

    let x = layout::PADDING;
    let mut y = layout::FIRST_BASELINE;
    canvas.text(Vector2::new(x, y), &style.title, layout::TITLE_TEXT_SIZE, palette.title);
    canvas.text_aligned(
        Vector2::new(size.width - layout::PADDING, y),
        &temperature_text(sample.battery_temp_c),
        layout::SMALL_TEXT_SIZE,
        tier_color(Metric::Temperature, state.temperature_tier()),
        TextAlign::Right,
    );
    y += layout::TITLE_LINE_HEIGHT;

    let metric_color = tier_color(Metric::Fps, state.fps_tier());
    let lines = [
        format!("FPS: {}", round_half_up(sample.fps)),
        format!("Frame: {:.1} ms", sample.frame_time_ms),
        format!("Speed: {}%", round_half_up(sample.emulation_speed_percent)),
    ];
    for line in &lines {
        canvas.text(Vector2::new(x, y), line, layout::SMALL_TEXT_SIZE, metric_color);
        y += layout::METRIC_LINE_HEIGHT;
    }

    if sample.shaders_building > 0 {
        canvas.text(
            Vector2::new(x, y),
            &building_text(sample.shaders_building, state.animation_phase()),
            layout::SMALL_TEXT_SIZE,
            palette.building,
        );
    }

    graph::draw(canvas, state.window(), graph::graph_rect(size), palette);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::canvas::{DisplayList, DrawCommand};
    use crate::overlay::measure::preferred;
    use crate::overlay::style::Theme;
    use crate::telemetry::{PerformanceSample, SeverityTier};

    fn render(state: &OverlayState, size: ViewSize) -> DisplayList {
        let mut list = DisplayList::new();
        draw(&mut list, state, size, &OverlayStyle::default());
        list
    }

    fn busy_state() -> OverlayState {
        let mut state = OverlayState::default();
        for ft in [14.0, 16.0, 20.0, 33.0] {
            state.update(PerformanceSample::new(59.6, ft, 99.5, 3, 31.0));
        }
        state
    }

    #[test]
    fn test_building_text() {
        assert_eq!(building_text(3, 0.0), "Building: 3 shader(s)");
        assert_eq!(building_text(3, 0.4), "Building: 3 shader(s) .");
        assert_eq!(building_text(1, 0.7), "Building: 1 shader(s) ..");
    }

    #[test]
    fn test_draw_is_idempotent() {
        let state = busy_state();
        let first = render(&state, preferred::PERFORMANCE);
        let second = render(&state, preferred::PERFORMANCE);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_text_lines() {
        let list = render(&busy_state(), preferred::PERFORMANCE);
        let texts = list.texts();
        assert_eq!(texts[0], "Performance");
        assert_eq!(texts[1], "TEMP: 31°C");
        assert_eq!(texts[2], "FPS: 60");
        assert_eq!(texts[3], "Frame: 33.0 ms");
        assert_eq!(texts[4], "Speed: 100%");
        assert_eq!(texts[5], "Building: 3 shader(s)");
        assert!(texts[6].starts_with("Min: 14.0ms"));
    }

    #[test]
    fn test_temperature_on_title_row() {
        let state = busy_state();
        let size = preferred::PERFORMANCE;
        let list = render(&state, size);
        match list.find_text("TEMP") {
            Some(DrawCommand::Text { position, text, color, align, .. }) => {
                assert_eq!(text, "TEMP: 31°C");
                assert_eq!(*align, TextAlign::Right);
                assert_eq!(*position, Vector2::new(size.width - layout::PADDING, layout::FIRST_BASELINE));
                assert_eq!(state.temperature_tier(), SeverityTier::Moderate);
                assert_eq!(*color, tier_color(Metric::Temperature, SeverityTier::Moderate));
            }
            other => panic!("missing temperature: {other:?}"),
        }
    }

    #[test]
    fn test_no_status_line_when_idle() {
        let mut state = OverlayState::default();
        state.update(PerformanceSample::new(60.0, 16.0, 100.0, 0, 25.0));
        let list = render(&state, preferred::PERFORMANCE);
        assert!(list.find_text("Building").is_none());
    }

    #[test]
    fn test_border_follows_drag_state() {
        let style = OverlayStyle::new("Performance", Theme::Dark);
        let mut state = OverlayState::default();
        state.set_dragging(true);

        let mut list = DisplayList::new();
        draw(&mut list, &state, preferred::PERFORMANCE, &style);
        let border = list.commands().iter().find_map(|c| match c {
            DrawCommand::StrokeRoundRect { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(border, Some(style.palette.border_dragging));
    }

    #[test]
    fn test_metric_color_follows_fps_tier() {
        let mut state = OverlayState::default();
        state.update(PerformanceSample::new(40.0, 25.0, 80.0, 0, 25.0));
        let list = render(&state, preferred::PERFORMANCE);
        match list.find_text("FPS") {
            Some(DrawCommand::Text { color, .. }) => {
                assert_eq!(*color, tier_color(Metric::Fps, state.fps_tier()));
            }
            other => panic!("missing FPS line: {other:?}"),
        }
    }

    #[test]
    fn test_zero_size_draws_nothing() {
        let list = render(&busy_state(), ViewSize::new(0.0, 0.0));
        assert!(list.is_empty());
    }

    #[test]
    fn test_empty_history_skips_graph() {
        let list = render(&OverlayState::default(), preferred::PERFORMANCE);
        assert!(list.find_text("Min").is_none());
        assert!(list.find_text("FPS: 0").is_some());
    }
}
