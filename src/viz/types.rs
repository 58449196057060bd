use serde::{Deserialize, Serialize};

/// 回放事件类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 调度参数（作为 t=0 的第一条事件）
    Meta { capacity: usize, quantum: u64 },
    /// 指令插入了新 job（进入待入队缓冲区）
    Insert { total: u64 },
    /// 待入队缓冲区整体并入优先队列
    Flush { count: usize },
    /// 选中新的活跃 job
    Select { completed: u64, total: u64 },
    /// 活跃 job 完成并被移除
    Complete,
    /// 单点查询
    PointQuery { found: bool },
    /// 区间查询
    RangeQuery { low: u64, high: u64, matched: usize },
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizEvent {
    /// 仿真时间（tick，和 `SimTime.0` 同口径）
    pub t: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<u64>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}
