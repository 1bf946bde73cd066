//! egui 绘制后端
//!
//! 把 `Canvas` 调用翻译成 egui 的形状，绘制到给定的 `Painter` 上。
//! 视图坐标加上 `origin` 即为屏幕坐标（叠加层被拖动后的位置）。

use egui::{epaint, Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use super::canvas::{Canvas, TextAlign};
use crate::math::{Color, RectF, Vector2};

/// 基于 egui Painter 的画布
pub struct EguiCanvas<'a> {
    painter: &'a Painter,
    origin: Vector2,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Vector2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, p: Vector2) -> Pos2 {
        Pos2::new(p.x + self.origin.x, p.y + self.origin.y)
    }

    fn rect(&self, r: RectF) -> Rect {
        Rect::from_min_max(
            self.pos(Vector2::new(r.left, r.top)),
            self.pos(Vector2::new(r.right, r.bottom)),
        )
    }
}

fn color32(c: Color) -> Color32 {
    let [r, g, b, a] = c.to_rgba_u8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Canvas for EguiCanvas<'_> {
    fn fill_round_rect(&mut self, rect: RectF, radius: f32, color: Color) {
        self.painter.rect_filled(self.rect(rect), radius, color32(color));
    }

    fn stroke_round_rect(&mut self, rect: RectF, radius: f32, width: f32, color: Color) {
        self.painter.rect_stroke(self.rect(rect), radius, Stroke::new(width, color32(color)));
    }

    fn line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color) {
        self.painter.line_segment([self.pos(from), self.pos(to)], Stroke::new(width, color32(color)));
    }

    fn dashed_line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color, dash: f32, gap: f32) {
        let path = [self.pos(from), self.pos(to)];
        let shapes = Shape::dashed_line(&path, Stroke::new(width, color32(color)), dash, gap);
        self.painter.extend(shapes);
    }

    fn polyline(&mut self, points: &[Vector2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        let points: Vec<Pos2> = points.iter().map(|&p| self.pos(p)).collect();
        self.painter.add(Shape::line(points, Stroke::new(width, color32(color))));
    }

    fn fill_under_polyline(&mut self, points: &[Vector2], baseline_y: f32, color: Color) {
        if points.len() < 2 {
            return;
        }

        // 每个线段与基线围成一个凸四边形，拆成两个三角形
        let fill = color32(color);
        let mut mesh = epaint::Mesh::default();
        for pair in points.windows(2) {
            let base = mesh.vertices.len() as u32;
            let (a, b) = (pair[0], pair[1]);
            mesh.colored_vertex(self.pos(a), fill);
            mesh.colored_vertex(self.pos(b), fill);
            mesh.colored_vertex(self.pos(Vector2::new(b.x, baseline_y)), fill);
            mesh.colored_vertex(self.pos(Vector2::new(a.x, baseline_y)), fill);
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn text_aligned(&mut self, position: Vector2, text: &str, size: f32, color: Color, align: TextAlign) {
        let anchor = match align {
            TextAlign::Left => Align2::LEFT_BOTTOM,
            TextAlign::Right => Align2::RIGHT_BOTTOM,
        };
        self.painter.text(
            self.pos(position),
            anchor,
            text,
            FontId::proportional(size),
            color32(color),
        );
    }
}
