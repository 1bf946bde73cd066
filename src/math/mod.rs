//! 叠加层使用的数学类型
//!
//! 提供二维向量、矩形和颜色类型，以及常用的工具函数。
//! 二维向量基于 `nalgebra`，与引擎其余部分保持一致。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2, RectF, Color
//! - **工具函数**：clamp, saturate

pub use nalgebra::Vector2 as Vec2;

/// 二维向量（位置、偏移量）
pub type Vector2 = Vec2<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建新的颜色
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 从整数值创建颜色（0-255）
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// 从 `0xRRGGBB` 创建不透明颜色
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_rgba_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xFF)
    }

    /// 从 `0xAARRGGBB` 创建颜色
    pub fn from_argb(argb: u32) -> Self {
        Self::from_rgba_u8((argb >> 16) as u8, (argb >> 8) as u8, argb as u8, (argb >> 24) as u8)
    }

    /// 返回替换了 alpha 的新颜色
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// 转换为 8 位分量（四舍五入）
    pub fn to_rgba_u8(&self) -> [u8; 4] {
        let q = |c: f32| (utils::saturate(c) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    // 预定义颜色
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
}

/// 轴对齐矩形（left/top/right/bottom，单位为像素）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// 以原点为左上角、给定尺寸的矩形
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// 宽或高不为正时视为空
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// 四边同时向内收缩
    pub fn inset(&self, amount: f32) -> Self {
        self.inset_xy(amount, amount)
    }

    /// 水平、垂直分别向内收缩
    pub fn inset_xy(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right - dx, self.bottom - dy)
    }
}

/// 数学工具函数
pub mod utils {
    /// 限制值在范围内
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// 饱和函数（限制在 0.0-1.0）
    pub fn saturate(value: f32) -> f32 {
        clamp(value, 0.0, 1.0)
    }
}
