//! 调度优先队列
//!
//! 有界二叉最小堆，按 `(completed, id)` 升序挑选下一个要施工的 job。

mod min_heap;

pub use min_heap::MinHeap;

use thiserror::Error;

use crate::job::JobHandle;

/// 默认容量：同时未完成的 job 数上限
pub const DEFAULT_CAPACITY: usize = 2000;

/// 入队失败：队列已满，被拒绝的句柄原样交还调用方。
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("priority queue is full (capacity {capacity})")]
pub struct QueueFull {
    pub capacity: usize,
    pub rejected: JobHandle,
}
