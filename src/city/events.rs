//! 调度事件
//!
//! `ApplyInstruction` 在指令时间戳生效；`Tick` 推进一个 tick，并在仍有工作时调度下一个 tick。

use super::instruction::Instruction;
use super::world::CityWorld;
use crate::error::SimError;
use crate::sim::{Event, Simulator, World};

fn city(world: &mut dyn World) -> &mut CityWorld {
    world
        .as_any_mut()
        .downcast_mut::<CityWorld>()
        .expect("world must be CityWorld")
}

/// 一条到期的指令
#[derive(Debug)]
pub struct ApplyInstruction {
    pub instruction: Instruction,
}

impl Event for ApplyInstruction {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<(), SimError> {
        city(world).apply(sim.now(), &self.instruction);
        Ok(())
    }
}

/// 一个仿真 tick
#[derive(Debug)]
pub struct Tick;

impl Event for Tick {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<(), SimError> {
        let now = sim.now();
        let w = city(world);
        w.tick(now)?;
        if w.has_work() {
            sim.schedule(now.next(), Tick);
        }
        Ok(())
    }
}
