//! 输出行

use std::fmt;

use crate::index::{PointQuery, RangeQuery};
use crate::job::JobId;
use crate::sim::SimTime;

/// 核心产出的一行结果（不含换行符）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// `(id,time)`
    Completed { id: JobId, at: SimTime },
    Point(PointQuery),
    Range(RangeQuery),
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLine::Completed { id, at } => write!(f, "({id},{at})"),
            OutputLine::Point(q) => write!(f, "{q}"),
            OutputLine::Range(q) => write!(f, "{q}"),
        }
    }
}
