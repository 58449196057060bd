//! Job arena
//!
//! 所有存活的 job 都放在这里；其它结构通过 `JobHandle` 引用。
//! 释放的槽位会被复用。

use std::ops::{Index, IndexMut};

use super::Job;

/// arena 中某个槽位的不透明句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobHandle(usize);

#[derive(Debug, Default, Clone)]
pub struct JobArena {
    slots: Vec<Option<Job>>,
    free: Vec<usize>,
    live: usize,
}

impl JobArena {
    pub fn insert(&mut self, job: Job) -> JobHandle {
        self.live += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(job);
                JobHandle(slot)
            }
            None => {
                self.slots.push(Some(job));
                JobHandle(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, h: JobHandle) -> Option<&Job> {
        self.slots.get(h.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, h: JobHandle) -> Option<&mut Job> {
        self.slots.get_mut(h.0).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, h: JobHandle) -> Option<Job> {
        let job = self.slots.get_mut(h.0)?.take()?;
        self.free.push(h.0);
        self.live -= 1;
        Some(job)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

// 使用已释放的句柄属于编程错误。
impl Index<JobHandle> for JobArena {
    type Output = Job;

    fn index(&self, h: JobHandle) -> &Job {
        match self.get(h) {
            Some(job) => job,
            None => panic!("stale job handle {h:?}"),
        }
    }
}

impl IndexMut<JobHandle> for JobArena {
    fn index_mut(&mut self, h: JobHandle) -> &mut Job {
        match self.get_mut(h) {
            Some(job) => job,
            None => panic!("stale job handle {h:?}"),
        }
    }
}
