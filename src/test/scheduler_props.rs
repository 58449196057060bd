use crate::city::{CityConfig, CityWorld, Instruction, InstructionKind, OutputLine};
use crate::job::JobId;
use crate::sim::{SimTime, Simulator};
use crate::viz::VizEventKind;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

const MAX_JOBS: usize = 60;

#[derive(Debug, Clone)]
enum Query {
    One(u64),
    Range(u64, u64),
}

/// 一个 job 的插入，以及可能紧随其后的一次查询
#[derive(Debug, Clone)]
struct Step {
    gap: u64,
    total: u64,
    query: Option<(u64, Query)>,
}

fn query_strategy() -> impl Strategy<Value = Query> {
    let id = 0..MAX_JOBS as u64 + 5;
    prop_oneof![
        id.clone().prop_map(Query::One),
        (id.clone(), id).prop_map(|(a, b)| Query::Range(a.min(b), a.max(b))),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    (0u64..4, 0u64..16, prop::option::of((0u64..2, query_strategy())))
        .prop_map(|(gap, total, query)| Step { gap, total, query })
}

/// id 互不相同、时间非递减的指令序列
fn workload_strategy() -> impl Strategy<Value = Vec<Instruction>> {
    (1..=MAX_JOBS)
        .prop_flat_map(|n| {
            let ids: Vec<u64> = (1..=n as u64).collect();
            (Just(ids).prop_shuffle(), prop::collection::vec(step_strategy(), n))
        })
        .prop_map(|(ids, steps)| build_workload(&ids, &steps))
}

fn build_workload(ids: &[u64], steps: &[Step]) -> Vec<Instruction> {
    let mut out = Vec::new();
    let mut t = 0;
    for (id, step) in ids.iter().zip(steps) {
        t += step.gap;
        out.push(Instruction::insert(t, *id, step.total));
        if let Some((gap, query)) = &step.query {
            t += gap;
            out.push(match *query {
                Query::One(id) => Instruction::print_one(t, id),
                Query::Range(low, high) => Instruction::print_range(t, low, high),
            });
        }
    }
    out
}

fn totals_of(instructions: &[Instruction]) -> HashMap<JobId, u64> {
    instructions
        .iter()
        .filter_map(|i| match i.kind {
            InstructionKind::Insert { id, total } => Some((id, total)),
            _ => None,
        })
        .collect()
}

fn progress_snapshot(world: &CityWorld) -> BTreeMap<JobId, u64> {
    world
        .index()
        .tree()
        .entries()
        .into_iter()
        .map(|(id, h)| (*id, world.jobs()[*h].completed))
        .collect()
}

/// 逐 tick 运行，检查进度单调、完成时刻精确，以及各结构的一致性。
fn check_run(instructions: Vec<Instruction>) {
    let totals = totals_of(&instructions);
    let cfg = CityConfig::default();

    let mut sim = Simulator::default();
    let mut world = CityWorld::new(cfg).expect("config");
    world.enable_viz();
    world.load(&mut sim, instructions);

    let mut prev = BTreeMap::new();
    let mut completions = HashMap::new();
    let mut t = 0;
    while sim.pending_events() > 0 {
        sim.run_until(SimTime(t), &mut world).expect("run_until");

        for line in world.take_output() {
            if let OutputLine::Completed { id, at } = line {
                assert_eq!(at, SimTime(t));
                let total = totals[&id];
                // finished at the end of the previous tick, or never needed any work
                assert!(total == 0 || prev.get(&id) == Some(&total), "job {id} at {t}");
                assert!(completions.insert(id, t).is_none(), "job {id} completed twice");
                assert!(world.job(id).is_none());
            }
        }

        let now = progress_snapshot(&world);
        let active = world.active_job().map(|j| j.id);
        for (id, completed) in &now {
            let advanced = u64::from(active == Some(*id));
            let before = prev.get(id).copied().unwrap_or(0);
            assert_eq!(*completed, before + advanced, "job {id} at tick {t}");
            if *completed == totals[id] && totals[id] > 0 {
                assert_eq!(active, Some(*id), "finished job {id} must still be active");
            }
        }

        assert!(world.index().tree().check_invariants());
        assert_eq!(world.index().len(), world.jobs().len());
        assert_eq!(world.queue().len() + world.pending().len(), world.jobs().len());
        if let Some(h) = world.active_handle() {
            assert_eq!(world.queue().peek_min(), Some(h));
        }

        // 自上次选择以来只有活跃 job 前进过；按选择时的进度，堆序必须成立
        let mut at_selection = world.jobs().clone();
        if let Some(h) = world.active_handle() {
            at_selection[h].completed -= world.quantum_elapsed();
        }
        assert!(world.queue().is_heap_ordered(&at_selection), "heap order at tick {t}");

        prev = now;
        t += 1;
    }

    assert_eq!(completions.len(), totals.len());
    assert_eq!(world.stats.busy_ticks, totals.values().sum::<u64>());
    assert!(world.jobs().is_empty());

    check_selection_discipline(&world, cfg.quantum);
}

/// 新 job 只有在一次并入队列之后才可能被选中；
/// 选择只发生在完成之后、空闲时，或距上次选择恰好一个时间片。
fn check_selection_discipline(world: &CityWorld, quantum: u64) {
    let events = &world.viz.as_ref().expect("viz enabled").events;
    assert!(matches!(events[0].kind, VizEventKind::Meta { .. }));

    let mut inserted_at = HashMap::new();
    let mut flushed = HashMap::new();
    let mut staged = Vec::new();
    let mut active: Option<u64> = None;
    let mut last_select: Option<u64> = None;
    let mut completed_tick: Option<u64> = None;

    for ev in events {
        match &ev.kind {
            VizEventKind::Insert { .. } => {
                let id = ev.job_id.expect("insert has job");
                inserted_at.insert(id, ev.t);
                staged.push(id);
            }
            VizEventKind::Flush { count } => {
                assert_eq!(*count, staged.len());
                for id in staged.drain(..) {
                    flushed.insert(id, ev.t);
                }
            }
            VizEventKind::Complete => {
                active = None;
                completed_tick = Some(ev.t);
            }
            VizEventKind::Select { .. } => {
                let id = ev.job_id.expect("select has job");
                let f = flushed.get(&id).copied().expect("selected before flush");
                assert!(inserted_at[&id] <= f && f <= ev.t);
                let at_boundary = last_select.is_some_and(|s| ev.t - s == quantum);
                assert!(
                    completed_tick == Some(ev.t) || active.is_none() || at_boundary,
                    "unexpected selection of {id} at {}",
                    ev.t
                );
                active = Some(id);
                last_select = Some(ev.t);
            }
            _ => {}
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_workloads_respect_progress_and_completion_rules(instructions in workload_strategy()) {
        check_run(instructions);
    }
}
