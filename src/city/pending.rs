//! 待入队缓冲区
//!
//! 当前时间片内新插入的 job 先暂存在这里，对调度不可见；
//! 只有在时间片边界或活跃 job 完成时才整体并入优先队列。

use crate::job::{JobArena, JobHandle};
use crate::queue::{MinHeap, QueueFull};

#[derive(Debug, Default)]
pub struct PendingBuffer {
    staged: Vec<JobHandle>,
}

impl PendingBuffer {
    pub fn stage(&mut self, h: JobHandle) {
        self.staged.push(h);
    }

    /// 按暂存顺序全部插入队列，返回插入个数。
    pub fn flush_into(&mut self, queue: &mut MinHeap, jobs: &JobArena) -> Result<usize, QueueFull> {
        let count = self.staged.len();
        for h in self.staged.drain(..) {
            queue.insert(h, jobs)?;
        }
        Ok(count)
    }

    pub fn clear(&mut self) {
        self.staged.clear();
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn contains(&self, h: JobHandle) -> bool {
        self.staged.contains(&h)
    }
}
