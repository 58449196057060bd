//! 仿真器
//!
//! 定义离散事件仿真器，维护当前时间与事件队列。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use crate::error::SimError;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace, warn};

/// 离散事件仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending_events(&self) -> usize {
        self.q.len()
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = %at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let seq = self.next_seq;
        trace!(now = %self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });

        trace!(queue_size = self.q.len(), "事件已加入队列");
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) -> Result<(), SimError> {
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            let Some(item) = self.q.pop() else { break };
            self.now = item.at;
            item.ev.execute(self, world)?;
        }
        self.now = self.now.max(until);
        Ok(())
    }

    /// 运行所有事件直到队列为空；任一事件失败即停止。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) -> Result<(), SimError> {
        info!("▶️  开始运行仿真");
        debug!(now = %self.now, queue_size = self.q.len(), "初始状态");

        let mut event_count: u64 = 0;
        while let Some(item) = self.q.pop() {
            event_count += 1;
            self.now = item.at;

            trace!(
                event_num = event_count,
                now = %self.now,
                seq = item.seq,
                remaining_queue = self.q.len(),
                "执行事件"
            );

            if let Err(err) = item.ev.execute(self, world) {
                warn!(now = %self.now, %err, "事件执行失败，仿真中止");
                return Err(err);
            }
        }

        info!(
            total_events = event_count,
            final_time = %self.now,
            "✅ 仿真完成"
        );
        Ok(())
    }
}
