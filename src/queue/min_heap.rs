//! 有界最小堆
//!
//! 槽位里只存 `JobHandle`，比较时从 `JobArena` 读取当前进度。
//! 活跃 job 的进度在 arena 中原地推进，因此堆顶可能暂时违反堆序，
//! 由 [`MinHeap::resift`] 负责恢复。

use crate::job::{JobArena, JobHandle};

use super::QueueFull;

#[derive(Debug)]
pub struct MinHeap {
    capacity: usize,
    slots: Vec<JobHandle>,
}

impl MinHeap {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
        }
    }

    /// 插入并上浮；已满时返回 `Err(QueueFull)`。
    pub fn insert(&mut self, h: JobHandle, jobs: &JobArena) -> Result<(), QueueFull> {
        if self.is_full() {
            return Err(QueueFull {
                capacity: self.capacity,
                rejected: h,
            });
        }
        self.slots.push(h);
        self.sift_up(self.slots.len() - 1, jobs);
        Ok(())
    }

    pub fn peek_min(&self) -> Option<JobHandle> {
        self.slots.first().copied()
    }

    /// 取出堆顶：最后一个元素补到根部，再下沉。
    pub fn remove_min(&mut self, jobs: &JobArena) -> Option<JobHandle> {
        if self.slots.is_empty() {
            return None;
        }
        let top = self.slots.swap_remove(0);
        self.sift_down(0, jobs);
        Some(top)
    }

    /// 不删除任何元素，仅从根部重新下沉。
    pub fn resift(&mut self, jobs: &JobArena) {
        self.sift_down(0, jobs);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, h: JobHandle) -> bool {
        self.slots.contains(&h)
    }

    /// 每个父节点的键都不大于其子节点的键
    pub fn is_heap_ordered(&self, jobs: &JobArena) -> bool {
        (1..self.slots.len()).all(|i| !self.is_smaller(i, (i - 1) / 2, jobs))
    }

    fn is_smaller(&self, a: usize, b: usize, jobs: &JobArena) -> bool {
        jobs[self.slots[a]].priority_key() < jobs[self.slots[b]].priority_key()
    }

    fn sift_up(&mut self, mut index: usize, jobs: &JobArena) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.is_smaller(index, parent, jobs) {
                break;
            }
            self.slots.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize, jobs: &JobArena) {
        let len = self.slots.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && self.is_smaller(right, left, jobs) {
                child = right;
            }
            if !self.is_smaller(child, index, jobs) {
                break;
            }
            self.slots.swap(index, child);
            index = child;
        }
    }
}
