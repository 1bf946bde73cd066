//! 拖动控制
//!
//! 触摸按下进入拖动状态，移动时按相对上一个触点的增量平移叠加层，
//! 每次移动后都按父视图当前尺寸把位置夹紧在可见范围内。
//! 触点坐标使用父视图坐标系。

use crate::math::{utils, Vector2};

use super::measure::ViewSize;

/// 父视图边界
///
/// 旋转或缩放会改变边界，每次移动都重新查询，不做缓存。
pub trait ParentBounds {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

/// 固定尺寸的父视图
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBounds {
    pub width: f32,
    pub height: f32,
}

impl FixedBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl ParentBounds for FixedBounds {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}

/// 触摸事件（父视图坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Cancel,
}

/// 拖动状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { last: Vector2 },
}

/// 拖动控制器
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    position: Vector2,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            position: Vector2::zeros(),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// 直接设置位置（不夹紧）
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn touch_down(&mut self, x: f32, y: f32) {
        self.state = DragState::Dragging {
            last: Vector2::new(x, y),
        };
    }

    /// 拖动中按增量移动并夹紧；空闲时忽略。返回位置是否改变
    pub fn touch_move(&mut self, x: f32, y: f32, view: ViewSize, parent: &dyn ParentBounds) -> bool {
        let DragState::Dragging { last } = self.state else {
            return false;
        };

        let current = Vector2::new(x, y);
        let delta = current - last;
        let moved = clamp_position(self.position + delta, view, parent);

        self.state = DragState::Dragging { last: current };
        let changed = moved != self.position;
        self.position = moved;
        changed
    }

    pub fn touch_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// 无论当前状态，回到原点并结束拖动
    pub fn reset_position(&mut self) {
        self.position = Vector2::zeros();
        self.state = DragState::Idle;
    }

    /// 分发触摸事件，返回是否需要重绘
    pub fn on_touch_event(&mut self, event: TouchEvent, view: ViewSize, parent: &dyn ParentBounds) -> bool {
        match event {
            TouchEvent::Down { x, y } => {
                self.touch_down(x, y);
                true
            }
            TouchEvent::Move { x, y } => self.touch_move(x, y, view, parent),
            TouchEvent::Up | TouchEvent::Cancel => {
                let was_dragging = self.is_dragging();
                self.touch_up();
                was_dragging
            }
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

/// 把位置夹紧到 `[0, parent_w - view_w] × [0, parent_h - view_h]`
///
/// 父视图比叠加层小时上界取 0。
pub fn clamp_position(position: Vector2, view: ViewSize, parent: &dyn ParentBounds) -> Vector2 {
    let max_x = (sanitize_extent(parent.width()) - view.width).max(0.0);
    let max_y = (sanitize_extent(parent.height()) - view.height).max(0.0);
    Vector2::new(
        clamp_axis(position.x, max_x),
        clamp_axis(position.y, max_y),
    )
}

fn sanitize_extent(extent: f32) -> f32 {
    debug_assert!(extent.is_finite() && extent >= 0.0, "malformed parent bounds: {extent}");
    if extent.is_finite() {
        extent.max(0.0)
    } else {
        0.0
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if value.is_finite() {
        utils::clamp(value, 0.0, max)
    } else {
        0.0
    }
}
