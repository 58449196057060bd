//! 错误类型
//!
//! 仿真核心与配置层的错误定义。

use thiserror::Error;

use crate::queue::QueueFull;

/// 仿真运行期错误：一旦出现即终止本次仿真。
#[derive(Debug, Error)]
pub enum SimError {
    /// 未完成的 job 数超过优先队列容量
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(#[from] QueueFull),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// 配置校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("queue capacity must be at least 1")]
    ZeroCapacity,
    #[error("quantum must be at least 1 tick")]
    ZeroQuantum,
}
