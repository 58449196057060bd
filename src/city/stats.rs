//! 统计信息

/// 调度统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub completed_jobs: u64,
    pub busy_ticks: u64,
    pub idle_ticks: u64,
    pub selections: u64,
    pub queries: u64,
}
