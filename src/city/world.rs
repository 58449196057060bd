//! 调度世界
//!
//! 持有 job arena、优先队列、有序索引与待入队缓冲区，并实现每个 tick 的调度步骤：
//! 完成检查 → 时间片边界重选 → 推进活跃 job。
//! 指令的生效（drain）由 `ApplyInstruction` 事件在同一时刻的 `Tick` 之前完成。

use std::any::Any;

use tracing::{debug, trace};

use super::config::CityConfig;
use super::events::{ApplyInstruction, Tick};
use super::instruction::{Instruction, InstructionKind};
use super::output::OutputLine;
use super::pending::PendingBuffer;
use super::stats::Stats;
use crate::error::{ConfigError, SimError};
use crate::index::{JobIndex, RangeQuery};
use crate::job::{Job, JobArena, JobHandle, JobId};
use crate::queue::MinHeap;
use crate::sim::{SimTime, Simulator, World};
use crate::viz::{VizEvent, VizEventKind, VizLogger};

#[derive(Debug)]
pub struct CityWorld {
    cfg: CityConfig,
    jobs: JobArena,
    queue: MinHeap,
    index: JobIndex,
    pending: PendingBuffer,
    active: Option<JobHandle>,
    /// 自上次选中活跃 job 以来经过的 tick 数
    quantum_elapsed: u64,
    /// 已调度但尚未生效的指令数
    instructions_remaining: usize,
    pub output: Vec<OutputLine>,
    pub stats: Stats,
    pub viz: Option<VizLogger>,
}

impl World for CityWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl CityWorld {
    pub fn new(cfg: CityConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            jobs: JobArena::default(),
            queue: MinHeap::new(cfg.capacity),
            index: JobIndex::default(),
            pending: PendingBuffer::default(),
            active: None,
            quantum_elapsed: 0,
            instructions_remaining: 0,
            output: Vec::new(),
            stats: Stats::default(),
            viz: None,
        })
    }

    /// 开启回放记录，第一条事件为调度参数。
    pub fn enable_viz(&mut self) {
        let mut viz = VizLogger::default();
        viz.push(VizEvent {
            t: 0,
            job_id: None,
            kind: VizEventKind::Meta {
                capacity: self.cfg.capacity,
                quantum: self.cfg.quantum,
            },
        });
        self.viz = Some(viz);
    }

    /// 把指令调度为事件，并在其后调度当前时刻的第一个 `Tick`。
    ///
    /// 同一时刻的事件按调度顺序执行，因此每个 tick 的指令总在该 tick 的调度步骤之前生效。
    pub fn load<I>(&mut self, sim: &mut Simulator, instructions: I)
    where
        I: IntoIterator<Item = Instruction>,
    {
        for instruction in instructions {
            self.instructions_remaining += 1;
            sim.schedule(instruction.time, ApplyInstruction { instruction });
        }
        debug!(instructions = self.instructions_remaining, "指令已载入");
        sim.schedule(sim.now(), Tick);
    }

    pub fn config(&self) -> &CityConfig {
        &self.cfg
    }

    pub fn jobs(&self) -> &JobArena {
        &self.jobs
    }

    pub fn queue(&self) -> &MinHeap {
        &self.queue
    }

    pub fn index(&self) -> &JobIndex {
        &self.index
    }

    pub fn pending(&self) -> &PendingBuffer {
        &self.pending
    }

    pub fn active_handle(&self) -> Option<JobHandle> {
        self.active
    }

    /// 当前活跃 job 的快照
    pub fn active_job(&self) -> Option<Job> {
        self.active.and_then(|h| self.jobs.get(h)).copied()
    }

    /// 按编号读取索引中的最新进度
    pub fn job(&self, id: JobId) -> Option<Job> {
        self.index.point(id, &self.jobs).0
    }

    pub fn quantum_elapsed(&self) -> u64 {
        self.quantum_elapsed
    }

    pub fn take_output(&mut self) -> Vec<OutputLine> {
        std::mem::take(&mut self.output)
    }

    /// 还有未生效的指令、队列非空或存在活跃 job
    pub fn has_work(&self) -> bool {
        self.instructions_remaining > 0
            || self.active.is_some()
            || !self.queue.is_empty()
            || !self.pending.is_empty()
    }

    /// 让一条到期的指令生效。
    pub fn apply(&mut self, now: SimTime, instruction: &Instruction) {
        self.instructions_remaining = self.instructions_remaining.saturating_sub(1);
        match instruction.kind {
            InstructionKind::Insert { id, total } => {
                let h = self.jobs.insert(Job::new(id, total));
                self.index.put(id, h);
                self.pending.stage(h);
                debug!(%now, %id, total, pending = self.pending.len(), "插入 job");
                self.record(now, Some(id), VizEventKind::Insert { total });
            }
            InstructionKind::PrintOne { id } => {
                let q = self.index.point(id, &self.jobs);
                self.stats.queries += 1;
                self.record(
                    now,
                    Some(id),
                    VizEventKind::PointQuery {
                        found: q.0.is_some(),
                    },
                );
                self.output.push(OutputLine::Point(q));
            }
            InstructionKind::PrintRange { low, high } => {
                let q = self.index.range(low, high, &self.jobs);
                let matched = match &q {
                    RangeQuery::EmptyIndex => 0,
                    RangeQuery::Matches(jobs) => jobs.len(),
                };
                self.stats.queries += 1;
                self.record(
                    now,
                    None,
                    VizEventKind::RangeQuery {
                        low: low.0,
                        high: high.0,
                        matched,
                    },
                );
                self.output.push(OutputLine::Range(q));
            }
        }
    }

    /// 一个 tick 的调度步骤（指令已在此之前生效）。
    pub fn tick(&mut self, now: SimTime) -> Result<(), SimError> {
        let retired = self.retire_completed(now)?;
        if !retired && self.quantum_elapsed % self.cfg.quantum == 0 {
            self.rotate(now)?;
            // 新选中的 job 可能总时长为 0
            self.retire_completed(now)?;
        }
        self.advance(now);
        Ok(())
    }

    /// 活跃 job 已完成时：输出完成记录，从索引、队列、arena 中移除，
    /// 并入待入队缓冲区后重新选择。新选中的 job 若也已完成则继续处理。
    fn retire_completed(&mut self, now: SimTime) -> Result<bool, SimError> {
        let mut retired = false;
        while let Some(h) = self.active.filter(|h| self.jobs[*h].is_complete()) {
            retired = true;
            let job = self.jobs[h];
            self.output.push(OutputLine::Completed { id: job.id, at: now });
            if self.index.get(job.id) == Some(h) {
                self.index.delete(job.id);
            }
            let removed = self.queue.remove_min(&self.jobs);
            debug_assert_eq!(removed, Some(h), "活跃 job 必须位于堆顶");
            self.jobs.remove(h);
            self.stats.completed_jobs += 1;
            debug!(%now, id = %job.id, total = job.total, "job 完成");
            self.record(now, Some(job.id), VizEventKind::Complete);

            self.flush_pending(now)?;
            self.select_next(now);
        }
        Ok(retired)
    }

    /// 时间片边界：恢复堆序，并入缓冲区，选出进度最少的 job。
    fn rotate(&mut self, now: SimTime) -> Result<(), SimError> {
        self.queue.resift(&self.jobs);
        self.flush_pending(now)?;
        self.select_next(now);
        Ok(())
    }

    fn flush_pending(&mut self, now: SimTime) -> Result<(), SimError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let count = self.pending.flush_into(&mut self.queue, &self.jobs)?;
        trace!(%now, count, queue_len = self.queue.len(), "缓冲区并入队列");
        self.record(now, None, VizEventKind::Flush { count });
        Ok(())
    }

    fn select_next(&mut self, now: SimTime) {
        self.pending.clear();
        self.quantum_elapsed = 0;
        debug_assert!(self.queue.is_heap_ordered(&self.jobs), "选择前堆序必须成立");
        self.active = self.queue.peek_min();
        if let Some(job) = self.active_job() {
            self.stats.selections += 1;
            debug!(%now, id = %job.id, completed = job.completed, total = job.total, "选中活跃 job");
            self.record(
                now,
                Some(job.id),
                VizEventKind::Select {
                    completed: job.completed,
                    total: job.total,
                },
            );
        }
    }

    // 进度只存在 arena 中，索引通过句柄读取，推进后即对下一 tick 的查询可见。
    fn advance(&mut self, now: SimTime) {
        match self.active {
            Some(h) => {
                let job = &mut self.jobs[h];
                job.advance();
                self.quantum_elapsed += 1;
                self.stats.busy_ticks += 1;
                trace!(%now, id = %job.id, completed = job.completed, "推进");
            }
            None => self.stats.idle_ticks += 1,
        }
    }

    fn record(&mut self, now: SimTime, job_id: Option<JobId>, kind: VizEventKind) {
        if let Some(viz) = self.viz.as_mut() {
            viz.push(VizEvent {
                t: now.0,
                job_id: job_id.map(|id| id.0),
                kind,
            });
        }
    }
}
