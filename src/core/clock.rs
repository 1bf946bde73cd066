//! 宿主时钟
//!
//! 叠加层不创建线程，也不阻塞等待：动画节拍通过宿主 UI 工具包的
//! 延时回调设施驱动。`HostClock` 是这一设施的抽象，`ManualClock`
//! 是由宿主循环推进时间的实现（演示程序和测试都使用它）。

/// 延时回调携带的票据
///
/// 票据记录安排回调时的代次，回调到达时据此判断是否已过期。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTicket {
    pub(crate) generation: u64,
}

/// 宿主的延时回调设施
///
/// 回调可能被合并或丢弃，调用方必须在每次节拍中显式重新安排，
/// 不能假设精确的周期。
pub trait HostClock {
    /// 当前单调时间（毫秒）
    fn now_ms(&self) -> u64;

    /// 安排 `delay_ms` 毫秒后以 `ticket` 回调
    fn schedule_callback(&mut self, delay_ms: u64, ticket: TickTicket);
}

/// 手动推进的时钟
///
/// 宿主在每帧调用 [`ManualClock::advance_to`]，取出到期的票据并交给
/// 对应的动画驱动器。
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: u64,
    pending: Vec<(u64, TickTicket)>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进到 `now_ms` 并按到期时间顺序返回到期的票据
    ///
    /// 时间不会倒退：小于当前时间的参数被忽略。
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TickTicket> {
        self.now_ms = self.now_ms.max(now_ms);

        let now = self.now_ms;
        let mut due: Vec<(u64, TickTicket)> = Vec::new();
        self.pending.retain(|&(at, ticket)| {
            if at <= now {
                due.push((at, ticket));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, ticket)| ticket).collect()
    }

    /// 推进 `delta_ms` 毫秒
    pub fn advance_by(&mut self, delta_ms: u64) -> Vec<TickTicket> {
        let target = self.now_ms.saturating_add(delta_ms);
        self.advance_to(target)
    }

    /// 丢弃所有待执行的回调（模拟系统压力下的回调丢失）
    pub fn drop_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// 待执行回调数量
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl HostClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_callback(&mut self, delay_ms: u64, ticket: TickTicket) {
        self.pending.push((self.now_ms.saturating_add(delay_ms), ticket));
    }
}
