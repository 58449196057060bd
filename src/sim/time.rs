//! 仿真时间类型
//!
//! 仿真时间以离散 tick 计数，从 0 开始单调递增。

use std::fmt;

/// 仿真时间（tick）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 下一个 tick
    pub fn next(self) -> SimTime {
        SimTime(self.0.saturating_add(1))
    }

    pub fn ticks(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
