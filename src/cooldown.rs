use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// 全局推送冷却闸门：记录最近一次成功推送的时刻。
///
/// 检查与占位在同一把锁内完成，并发请求不会同时通过闸门。
#[derive(Debug)]
pub struct CooldownGate {
    interval: Duration,
    last_sent_at: Mutex<Option<Instant>>,
}

/// 仍处于冷却期，`retry_after` 为剩余时间。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoolingDown {
    pub retry_after: Duration,
}

impl CooldownGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_sent_at: Mutex::new(None),
        }
    }

    pub fn last_sent_at(&self) -> Option<Instant> {
        *self.lock()
    }

    /// 通过闸门时立即把 `now` 记为最近推送时刻，并返回许可。
    /// 只有显式调用 [`DispatchPermit::release`] 才会恢复之前的时刻，
    /// 请求被取消时占位保留。
    pub fn try_acquire(&self, now: Instant) -> Result<DispatchPermit<'_>, CoolingDown> {
        let mut last_sent_at = self.lock();

        if let Some(previous) = *last_sent_at {
            let elapsed = now.saturating_duration_since(previous);
            if elapsed < self.interval {
                return Err(CoolingDown {
                    retry_after: self.interval - elapsed,
                });
            }
        }

        let previous = last_sent_at.replace(now);
        Ok(DispatchPermit {
            gate: self,
            previous,
            reserved: now,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        // 锁内只有赋值操作，中毒后数据仍然一致
        self.last_sent_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
pub struct DispatchPermit<'a> {
    gate: &'a CooldownGate,
    previous: Option<Instant>,
    reserved: Instant,
}

impl DispatchPermit<'_> {
    /// 推送失败，归还本次占位，下一次请求可立即重试。
    pub fn release(self) {
        let mut last_sent_at = self.gate.lock();
        if *last_sent_at == Some(self.reserved) {
            *last_sent_at = self.previous;
        }
    }
}
