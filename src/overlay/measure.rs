//! 视图尺寸协商
//!
//! 宿主布局系统给出每个维度的约束，叠加层据此从首选尺寸得出实际尺寸。

/// 单个维度上的布局约束
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureSpec {
    /// 父视图指定了精确尺寸
    Exactly(f32),
    /// 不超过给定尺寸
    AtMost(f32),
    /// 无约束
    Unspecified,
}

impl MeasureSpec {
    /// 按约束解析首选尺寸
    pub fn resolve(self, desired: f32) -> f32 {
        let size = match self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(limit) => desired.min(limit),
            MeasureSpec::Unspecified => desired,
        };
        if size.is_finite() {
            size.max(0.0)
        } else {
            0.0
        }
    }
}

/// 视图尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewSize {
    pub width: f32,
    pub height: f32,
}

impl ViewSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// 任一维度为 0 ⇒ 视图不可绘制
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// 首选尺寸
pub mod preferred {
    use super::ViewSize;

    pub const PERFORMANCE: ViewSize = ViewSize::new(280.0, 200.0);
    pub const FPS: ViewSize = ViewSize::new(80.0, 30.0);
    pub const THERMAL: ViewSize = ViewSize::new(100.0, 30.0);
    pub const RAM: ViewSize = ViewSize::new(120.0, 30.0);
}

/// 计算视图实际尺寸
pub fn measure(desired: ViewSize, width_spec: MeasureSpec, height_spec: MeasureSpec) -> ViewSize {
    ViewSize {
        width: width_spec.resolve(desired.width),
        height: height_spec.resolve(desired.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(MeasureSpec::Exactly(300.0).resolve(280.0), 300.0);
        assert_eq!(MeasureSpec::AtMost(100.0).resolve(280.0), 100.0);
        assert_eq!(MeasureSpec::AtMost(500.0).resolve(280.0), 280.0);
        assert_eq!(MeasureSpec::Unspecified.resolve(280.0), 280.0);
    }

    #[test]
    fn test_degenerate_constraints_resolve_to_zero() {
        assert_eq!(MeasureSpec::Exactly(-5.0).resolve(80.0), 0.0);
        assert_eq!(MeasureSpec::Exactly(f32::NAN).resolve(80.0), 0.0);
    }

    #[test]
    fn test_measure() {
        let size = measure(preferred::FPS, MeasureSpec::Unspecified, MeasureSpec::AtMost(20.0));
        assert_eq!(size, ViewSize::new(80.0, 20.0));
        assert!(!size.is_empty());
        assert!(ViewSize::new(0.0, 30.0).is_empty());
    }
}
