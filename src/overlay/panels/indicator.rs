//! 单行指示器

use crate::math::{Color, Vector2};
use crate::overlay::canvas::Canvas;
use crate::overlay::measure::ViewSize;
use crate::overlay::style::layout;

/// 在视图左下角绘制一行文本，基线位于 `(8, h - 8)`
pub fn draw_line(canvas: &mut dyn Canvas, size: ViewSize, text: &str, color: Color) {
    if size.is_empty() {
        return;
    }
    canvas.text(
        Vector2::new(
            layout::INDICATOR_TEXT_INSET,
            size.height - layout::INDICATOR_TEXT_INSET,
        ),
        text,
        layout::SMALL_TEXT_SIZE,
        color,
    );
}
