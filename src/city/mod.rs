//! 施工调度（rising city）
//!
//! 在离散事件仿真器上实现按 tick 推进的调度循环：
//! 指令插入 job 或查询进度；调度器总是施工进度最少的 job，
//! 每个时间片（默认 5 tick）或 job 完成时重新挑选，直到所有 job 完成。

mod config;
mod events;
mod instruction;
mod output;
mod pending;
mod stats;
mod world;

pub use config::{CityConfig, DEFAULT_QUANTUM};
pub use events::{ApplyInstruction, Tick};
pub use instruction::{Instruction, InstructionKind};
pub use output::OutputLine;
pub use pending::PendingBuffer;
pub use stats::Stats;
pub use world::CityWorld;

use crate::error::SimError;
use crate::sim::Simulator;

/// 运行完整仿真并返回全部输出行。
pub fn simulate<I>(instructions: I, cfg: CityConfig) -> Result<Vec<OutputLine>, SimError>
where
    I: IntoIterator<Item = Instruction>,
{
    let mut sim = Simulator::default();
    let mut world = CityWorld::new(cfg)?;
    world.load(&mut sim, instructions);
    sim.run(&mut world)?;
    Ok(world.take_output())
}
