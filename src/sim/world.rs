//! 世界 trait
//!
//! 定义仿真世界接口。

use std::any::Any;

/// 仿真世界：由业务层实现（例如调度器状态/统计等）。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
