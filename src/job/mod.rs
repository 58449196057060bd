//! Job（建筑）模块
//!
//! 定义 job 实体、标识符，以及持有全部存活 job 的 arena。
//! 优先队列和有序索引只保存 [`JobHandle`]，job 的进度只有一份真实数据。

mod arena;
mod id;

pub use arena::{JobArena, JobHandle};
pub use id::JobId;

use std::fmt;

/// 一个施工任务：固定总时长，逐 tick 累计已完成时长。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    /// 需要的总时长（tick）
    pub total: u64,
    /// 已完成的时长（tick），始终 `<= total`
    pub completed: u64,
}

impl Job {
    pub fn new(id: JobId, total: u64) -> Self {
        Self {
            id,
            total,
            completed: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.completed)
    }

    /// 优先级键：进度少者优先，进度相同时编号小者优先。
    pub fn priority_key(&self) -> (u64, JobId) {
        (self.completed, self.id)
    }

    /// 推进一个 tick；已完成的 job 不再变化。
    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.completed += 1;
        }
    }
}

/// 输出格式：`(id,completed,total)`
impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.id, self.completed, self.total)
    }
}
