//! 叠加层绘制例程
//!
//! 每个例程都是纯函数：读取状态，向 `Canvas` 发出绘制命令，从不修改状态。

pub mod graph;
pub mod indicator;
pub mod performance;

/// 四舍五入到整数（.5 向上）
pub fn round_half_up(value: f32) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(59.5), 60);
        assert_eq!(round_half_up(59.49), 59);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(f32::NAN), 0);
    }
}
