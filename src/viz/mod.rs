//! 调度过程回放记录
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：只在内存中累积，仿真结束后一次性写出

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger};
