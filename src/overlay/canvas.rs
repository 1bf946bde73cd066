//! 绘制目标抽象
//!
//! 渲染例程只依赖 `Canvas` trait。`DisplayList` 把绘制调用记录成
//! 命令列表，用于测试和幂等性检查；`EguiCanvas`（见 `egui_canvas`）
//! 把同样的调用画进 egui 的 Painter。
//!
//! 坐标以视图左上角为原点，文本位置是基线上的对齐点（默认左端）。

use crate::math::{Color, RectF, Vector2};

/// 文本相对于位置的水平对齐
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// 位置是文本左端
    #[default]
    Left,
    /// 位置是文本右端
    Right,
}

/// 绘制目标
pub trait Canvas {
    /// 填充圆角矩形
    fn fill_round_rect(&mut self, rect: RectF, radius: f32, color: Color);

    /// 描边圆角矩形
    fn stroke_round_rect(&mut self, rect: RectF, radius: f32, width: f32, color: Color);

    /// 直线段
    fn line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color);

    /// 虚线段
    fn dashed_line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color, dash: f32, gap: f32);

    /// 折线
    fn polyline(&mut self, points: &[Vector2], width: f32, color: Color);

    /// 填充折线与水平基线 `baseline_y` 之间的区域
    fn fill_under_polyline(&mut self, points: &[Vector2], baseline_y: f32, color: Color);

    /// 按 `align` 对齐的基线文本
    fn text_aligned(&mut self, position: Vector2, text: &str, size: f32, color: Color, align: TextAlign);

    /// 文本（左侧基线对齐）
    fn text(&mut self, position: Vector2, text: &str, size: f32, color: Color) {
        self.text_aligned(position, text, size, color, TextAlign::Left);
    }
}

/// 记录下来的绘制命令
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRoundRect { rect: RectF, radius: f32, color: Color },
    StrokeRoundRect { rect: RectF, radius: f32, width: f32, color: Color },
    Line { from: Vector2, to: Vector2, width: f32, color: Color },
    DashedLine { from: Vector2, to: Vector2, width: f32, color: Color, dash: f32, gap: f32 },
    Polyline { points: Vec<Vector2>, width: f32, color: Color },
    FillUnderPolyline { points: Vec<Vector2>, baseline_y: f32, color: Color },
    Text { position: Vector2, text: String, size: f32, color: Color, align: TextAlign },
}

/// 命令记录画布
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// 所有文本命令的内容，按绘制顺序
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 查找以 `prefix` 开头的文本命令
    pub fn find_text(&self, prefix: &str) -> Option<&DrawCommand> {
        self.commands.iter().find(|c| matches!(c, DrawCommand::Text { text, .. } if text.starts_with(prefix)))
    }
}

impl Canvas for DisplayList {
    fn fill_round_rect(&mut self, rect: RectF, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillRoundRect { rect, radius, color });
    }

    fn stroke_round_rect(&mut self, rect: RectF, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRoundRect { rect, radius, width, color });
    }

    fn line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn dashed_line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color, dash: f32, gap: f32) {
        self.commands.push(DrawCommand::DashedLine { from, to, width, color, dash, gap });
    }

    fn polyline(&mut self, points: &[Vector2], width: f32, color: Color) {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), width, color });
    }

    fn fill_under_polyline(&mut self, points: &[Vector2], baseline_y: f32, color: Color) {
        self.commands.push(DrawCommand::FillUnderPolyline { points: points.to_vec(), baseline_y, color });
    }

    fn text_aligned(&mut self, position: Vector2, text: &str, size: f32, color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::Text { position, text: text.to_string(), size, color, align });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list_records_in_order() {
        let mut list = DisplayList::new();
        list.fill_round_rect(RectF::from_size(10.0, 10.0), 2.0, Color::BLACK);
        list.text(Vector2::new(1.0, 9.0), "FPS: 60", 18.0, Color::WHITE);
        list.text_aligned(Vector2::new(9.0, 9.0), "TEMP: 30°C", 14.0, Color::WHITE, TextAlign::Right);

        assert_eq!(list.commands().len(), 3);
        assert!(matches!(list.commands()[1], DrawCommand::Text { align: TextAlign::Left, .. }));
        assert!(matches!(list.commands()[2], DrawCommand::Text { align: TextAlign::Right, .. }));
        assert!(matches!(list.commands()[0], DrawCommand::FillRoundRect { .. }));
        assert_eq!(list.texts(), vec!["FPS: 60", "TEMP: 30°C"]);
        assert!(list.find_text("FPS").is_some());
        assert!(list.find_text("RAM").is_none());

        list.clear();
        assert!(list.is_empty());
    }
}
