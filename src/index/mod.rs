//! 有序索引
//!
//! 以 job 编号为键的左倾红黑树，支持单点查询与区间查询。
//! 值是 `JobHandle`，查询时从 `JobArena` 读出最新进度。

mod rb_tree;

pub use rb_tree::RedBlackTree;

use std::fmt;

use crate::job::{Job, JobArena, JobHandle, JobId};

/// 查询无结果时输出的哨兵元组
pub const SENTINEL: &str = "(0,0,0)";

/// 单点查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointQuery(pub Option<Job>);

impl fmt::Display for PointQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(job) => write!(f, "{job}"),
            None => f.write_str(SENTINEL),
        }
    }
}

/// 区间查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeQuery {
    /// 索引中没有任何条目，不论区间为何都输出哨兵
    EmptyIndex,
    /// 区间内的条目（可能为空，此时输出空行），按编号升序
    Matches(Vec<Job>),
}

impl fmt::Display for RangeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeQuery::EmptyIndex => f.write_str(SENTINEL),
            RangeQuery::Matches(jobs) => {
                for (i, job) in jobs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{job}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct JobIndex {
    tree: RedBlackTree<JobId, JobHandle>,
}

impl JobIndex {
    pub fn put(&mut self, id: JobId, h: JobHandle) {
        self.tree.put(id, h);
    }

    pub fn get(&self, id: JobId) -> Option<JobHandle> {
        self.tree.get(&id).copied()
    }

    pub fn delete(&mut self, id: JobId) -> bool {
        self.tree.delete(&id)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn point(&self, id: JobId, jobs: &JobArena) -> PointQuery {
        PointQuery(self.get(id).and_then(|h| jobs.get(h)).copied())
    }

    pub fn range(&self, low: JobId, high: JobId, jobs: &JobArena) -> RangeQuery {
        if self.tree.is_empty() {
            return RangeQuery::EmptyIndex;
        }
        let matches = self
            .tree
            .range(&low, &high)
            .into_iter()
            .filter_map(|(_, h)| jobs.get(*h).copied())
            .collect();
        RangeQuery::Matches(matches)
    }

    pub fn tree(&self) -> &RedBlackTree<JobId, JobHandle> {
        &self.tree
    }
}
