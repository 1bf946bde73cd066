//! 着色器编译动画驱动
//!
//! 动画由宿主时钟的延时回调推进，不占用线程。驱动器只有
//! 运行 / 停止两种状态：`start` 安排第一个回调，每个节拍重新安排下一个，
//! `stop` 递增代次使所有在途回调失效。

use crate::core::clock::{HostClock, TickTicket};

/// 默认节拍周期（毫秒）
pub const DEFAULT_PERIOD_MS: u64 = 50;

/// 默认每个节拍的相位步长
pub const DEFAULT_STEP: f32 = 0.1;

/// 在途回调逾期超过该周期数即视为被宿主丢弃
const STALL_PERIODS: u64 = 4;

/// 动画相位，取值 [0, 1)
///
/// 相位由整数节拍计数推导，累加误差不会随时间增长。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPhase {
    ticks: u64,
    step: f64,
}

impl AnimationPhase {
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 && step < 1.0 {
            f64::from(step)
        } else {
            f64::from(DEFAULT_STEP)
        };
        // 步长取到 1e-6 精度，使 0.1 这类步长十步后精确回到 0
        Self {
            ticks: 0,
            step: (step * 1e6).round() / 1e6,
        }
    }

    pub fn advance(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn value(&self) -> f32 {
        (self.ticks as f64 * self.step).fract() as f32
    }
}

impl Default for AnimationPhase {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

/// 状态行末尾的点数：[0,0.33) → 0，[0.33,0.66) → 1，[0.66,1) → 2
pub fn dot_count(phase: f32) -> usize {
    if phase < 0.33 {
        0
    } else if phase < 0.66 {
        1
    } else {
        2
    }
}

/// 协作式动画驱动器
#[derive(Debug)]
pub struct AnimationDriver {
    period_ms: u64,
    running: bool,
    generation: u64,
    due_at_ms: Option<u64>,
}

impl AnimationDriver {
    pub fn new(period_ms: u64) -> Self {
        debug_assert!(period_ms > 0, "animation period must be positive");
        Self {
            period_ms: period_ms.max(1),
            running: false,
            generation: 0,
            due_at_ms: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 启动动画
    ///
    /// 已在运行时为空操作，除非在途回调已严重逾期（被宿主丢弃），
    /// 此时以新的代次重新安排。返回是否安排了新的回调。
    pub fn start(&mut self, clock: &mut dyn HostClock) -> bool {
        if self.running {
            let stalled = self
                .due_at_ms
                .map(|due| clock.now_ms() > due.saturating_add(STALL_PERIODS * self.period_ms))
                .unwrap_or(true);
            if !stalled {
                return false;
            }
            crate::overlay_debug!(generation = self.generation, "Animation callback lost, re-arming");
        }

        self.running = true;
        self.generation = self.generation.wrapping_add(1);
        self.arm(clock);
        true
    }

    /// 停止动画；之后到达的所有回调都被忽略
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.generation = self.generation.wrapping_add(1);
        self.due_at_ms = None;
        true
    }

    /// 处理到期回调
    ///
    /// 票据属于当前代次时推进相位并重新安排下一个回调，返回 true
    /// 表示需要重绘。过期票据返回 false 且不再安排回调。
    pub fn on_tick(&mut self, ticket: TickTicket, clock: &mut dyn HostClock, phase: &mut AnimationPhase) -> bool {
        if !self.running || ticket.generation != self.generation {
            return false;
        }
        phase.advance();
        self.arm(clock);
        true
    }

    fn arm(&mut self, clock: &mut dyn HostClock) {
        self.due_at_ms = Some(clock.now_ms().saturating_add(self.period_ms));
        clock.schedule_callback(
            self.period_ms,
            TickTicket {
                generation: self.generation,
            },
        );
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD_MS)
    }
}
