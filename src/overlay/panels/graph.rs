//! 帧时间折线图

use crate::math::{RectF, Vector2};
use crate::overlay::canvas::Canvas;
use crate::overlay::measure::ViewSize;
use crate::overlay::style::{layout, Palette};
use crate::telemetry::window::BASELINE_FRAME_TIME_MS;
use crate::telemetry::RollingWindow;

/// 图表区域：指标文本下方，左右各留 `GRAPH_INSET_X`
pub fn graph_rect(size: ViewSize) -> RectF {
    let top = layout::FIRST_BASELINE
        + layout::TITLE_LINE_HEIGHT
        + layout::METRIC_LINE_HEIGHT * 3.0
        + layout::GRAPH_GAP;
    RectF::new(
        layout::GRAPH_INSET_X,
        top,
        size.width - layout::GRAPH_INSET_X,
        size.height - layout::GRAPH_BOTTOM_INSET,
    )
}

/// 窗口中每个样本的归一化高度，按时间顺序
pub fn normalized_points(window: &RollingWindow) -> Vec<f32> {
    let stats = window.stats();
    window.iter().map(|v| stats.normalize(v)).collect()
}

/// 样本在图表区域内的坐标
///
/// 按索引沿宽度均匀分布；单个样本画成横跨整个宽度的水平线。
pub fn data_points(window: &RollingWindow, rect: RectF) -> Vec<Vector2> {
    let heights = normalized_points(window);
    let y_of = |norm: f32| rect.bottom - norm * rect.height();

    match heights.len() {
        0 => Vec::new(),
        1 => {
            let y = y_of(heights[0]);
            vec![Vector2::new(rect.left, y), Vector2::new(rect.right, y)]
        }
        n => {
            let step = rect.width() / (n - 1) as f32;
            heights
                .iter()
                .enumerate()
                .map(|(i, &h)| Vector2::new(rect.left + step * i as f32, y_of(h)))
                .collect()
        }
    }
}

/// 统计说明文字
pub fn caption(window: &RollingWindow) -> String {
    let stats = window.stats();
    format!(
        "Min: {:.1}ms | Avg: {:.1}ms | Max: {:.1}ms",
        stats.min, stats.avg, stats.max
    )
}

/// 绘制图表
///
/// 窗口为空或区域退化时不绘制任何内容。
pub fn draw(canvas: &mut dyn Canvas, window: &RollingWindow, rect: RectF, palette: &Palette) {
    if window.is_empty() || rect.is_empty() {
        return;
    }

    canvas.fill_round_rect(rect, layout::GRAPH_RADIUS, palette.graph_background);

    // 网格线把区域分成四等份
    for band in 1..layout::GRID_BANDS {
        let y = rect.top + rect.height() * band as f32 / layout::GRID_BANDS as f32;
        canvas.line(
            Vector2::new(rect.left, y),
            Vector2::new(rect.right, y),
            layout::GRID_LINE_WIDTH,
            palette.grid,
        );
    }

    let points = data_points(window, rect);
    canvas.fill_under_polyline(&points, rect.bottom, palette.graph_fill());

    // 60 FPS 参考线，只在落在数据范围内时绘制
    let stats = window.stats();
    if stats.min < BASELINE_FRAME_TIME_MS && BASELINE_FRAME_TIME_MS < stats.max {
        let y = rect.bottom - stats.normalize(BASELINE_FRAME_TIME_MS) * rect.height();
        canvas.dashed_line(
            Vector2::new(rect.left, y),
            Vector2::new(rect.right, y),
            layout::GRID_LINE_WIDTH,
            palette.reference_line,
            layout::REFERENCE_DASH,
            layout::REFERENCE_GAP,
        );
    }

    canvas.polyline(&points, layout::GRAPH_LINE_WIDTH, palette.graph_line);

    canvas.text(
        Vector2::new(rect.left, rect.bottom + layout::CAPTION_OFFSET),
        &caption(window),
        layout::SMALL_TEXT_SIZE,
        palette.caption,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::canvas::{DisplayList, DrawCommand};
    use crate::overlay::style::Theme;

    fn window_of(values: &[f32]) -> RollingWindow {
        let mut window = RollingWindow::default();
        for &v in values {
            window.push(v);
        }
        window
    }

    fn count(list: &DisplayList, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        list.commands().iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_normalized_points() {
        assert_eq!(normalized_points(&window_of(&[10.0, 20.0, 30.0])), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalized_points(&window_of(&[16.67, 16.67])), vec![0.5, 0.5]);
    }

    #[test]
    fn test_data_points_span_width() {
        let rect = RectF::new(20.0, 120.0, 260.0, 176.0);
        let points = data_points(&window_of(&[10.0, 20.0, 30.0]), rect);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], Vector2::new(20.0, 176.0));
        assert_eq!(points[1], Vector2::new(140.0, 148.0));
        assert_eq!(points[2], Vector2::new(260.0, 120.0));
    }

    #[test]
    fn test_single_sample_is_flat_line() {
        let rect = RectF::new(0.0, 0.0, 100.0, 40.0);
        let points = data_points(&window_of(&[16.0]), rect);
        assert_eq!(points, vec![Vector2::new(0.0, 20.0), Vector2::new(100.0, 20.0)]);
    }

    #[test]
    fn test_draw_layers() {
        let palette = Palette::for_theme(Theme::Dark);
        let rect = graph_rect(ViewSize::new(280.0, 200.0));
        let mut list = DisplayList::new();
        draw(&mut list, &window_of(&[10.0, 20.0, 30.0]), rect, &palette);

        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Line { .. })), 3);
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::DashedLine { .. })), 1);
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::FillUnderPolyline { .. })), 1);
        assert_eq!(list.texts(), vec!["Min: 10.0ms | Avg: 20.0ms | Max: 30.0ms"]);

        // 折线在填充之后绘制
        let fill = list.commands().iter().position(|c| matches!(c, DrawCommand::FillUnderPolyline { .. }));
        let line = list.commands().iter().position(|c| matches!(c, DrawCommand::Polyline { .. }));
        assert!(fill < line);
    }

    #[test]
    fn test_reference_line_outside_range() {
        let palette = Palette::for_theme(Theme::Dark);
        let mut list = DisplayList::new();
        draw(&mut list, &window_of(&[20.0, 30.0]), RectF::new(0.0, 0.0, 100.0, 50.0), &palette);
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::DashedLine { .. })), 0);
    }

    #[test]
    fn test_empty_window_draws_nothing() {
        let palette = Palette::for_theme(Theme::Dark);
        let mut list = DisplayList::new();
        draw(&mut list, &RollingWindow::default(), RectF::new(0.0, 0.0, 100.0, 50.0), &palette);
        assert!(list.is_empty());
    }
}
