//! 指令
//!
//! 已解析、按时间非递减排列的输入指令。

use crate::job::JobId;
use crate::sim::SimTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    /// 新建 job，进度为 0
    Insert { id: JobId, total: u64 },
    /// 单点查询
    PrintOne { id: JobId },
    /// 区间查询 `[low, high]`
    PrintRange { low: JobId, high: JobId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub time: SimTime,
    pub kind: InstructionKind,
}

impl Instruction {
    pub fn insert(time: u64, id: u64, total: u64) -> Self {
        Self {
            time: SimTime(time),
            kind: InstructionKind::Insert {
                id: JobId(id),
                total,
            },
        }
    }

    pub fn print_one(time: u64, id: u64) -> Self {
        Self {
            time: SimTime(time),
            kind: InstructionKind::PrintOne { id: JobId(id) },
        }
    }

    pub fn print_range(time: u64, low: u64, high: u64) -> Self {
        Self {
            time: SimTime(time),
            kind: InstructionKind::PrintRange {
                low: JobId(low),
                high: JobId(high),
            },
        }
    }
}
