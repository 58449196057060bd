//! 调度参数

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::queue::DEFAULT_CAPACITY;

/// 默认时间片长度（tick）
pub const DEFAULT_QUANTUM: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CityConfig {
    /// 优先队列容量（同时未完成的 job 数上限）
    pub capacity: usize,
    /// 活跃 job 连续施工多少 tick 后重新挑选
    pub quantum: u64,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl CityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(())
    }
}
