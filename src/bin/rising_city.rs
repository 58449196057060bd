//! 施工调度仿真
//!
//! 读取指令文件，运行调度仿真，把完成记录与查询结果逐行写出。

use clap::Parser;
use rising_city::city::{CityConfig, CityWorld, OutputLine};
use rising_city::input::parse_instructions;
use rising_city::sim::Simulator;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "rising_city", about = "施工调度仿真：按最少进度优先、固定时间片推进")]
struct Args {
    /// 指令文件
    input: PathBuf,

    /// 结果输出文件
    #[arg(long, default_value = "output_file.txt")]
    output: PathBuf,

    /// 输出到 stdout 而不是文件
    #[arg(long)]
    stdout: bool,

    /// 调度参数 JSON（capacity / quantum）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖优先队列容量
    #[arg(long)]
    capacity: Option<usize>,

    /// 覆盖时间片长度（tick）
    #[arg(long)]
    quantum: Option<u64>,

    /// 输出回放 JSON 文件
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

fn load_config(args: &Args) -> CityConfig {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).expect("read config json");
            serde_json::from_str::<CityConfig>(&raw).unwrap_or_else(|err| {
                error!(path = %path.display(), %err, "配置解析失败");
                process::exit(1);
            })
        }
        None => CityConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        cfg.capacity = capacity;
    }
    if let Some(quantum) = args.quantum {
        cfg.quantum = quantum;
    }
    cfg
}

fn write_lines<W: Write>(out: W, lines: &[OutputLine]) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn write_output(args: &Args, lines: &[OutputLine]) -> io::Result<()> {
    if args.stdout {
        write_lines(io::stdout().lock(), lines)
    } else {
        write_lines(fs::File::create(&args.output)?, lines)
    }
}

fn write_viz(path: &Path, world: &CityWorld) {
    let Some(viz) = world.viz.as_ref() else {
        return;
    };
    let json = viz.to_json().expect("serialize viz events");
    fs::write(path, json).expect("write viz json");
    info!(path = %path.display(), events = viz.events.len(), "回放 JSON 已写出");
}

fn main() {
    // 初始化 tracing（写 stderr，结果流保持干净）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let raw = fs::read_to_string(&args.input).expect("read instruction file");
    let instructions = parse_instructions(&raw).unwrap_or_else(|err| {
        error!(path = %args.input.display(), %err, "指令解析失败");
        process::exit(1);
    });

    let cfg = load_config(&args);
    let mut world = CityWorld::new(cfg).unwrap_or_else(|err| {
        error!(%err, "配置无效");
        process::exit(1);
    });
    if args.viz_json.is_some() {
        world.enable_viz();
    }

    let mut sim = Simulator::default();
    world.load(&mut sim, instructions);
    let result = sim.run(&mut world);

    // 致命错误前已产生的结果仍然写出
    let lines = world.take_output();
    if let Err(err) = write_output(&args, &lines) {
        error!(%err, "写出结果失败");
        process::exit(1);
    }
    if let Some(path) = &args.viz_json {
        write_viz(path, &world);
    }

    if let Err(err) = result {
        error!(now = %sim.now(), %err, "仿真中止");
        process::exit(1);
    }

    let stats = world.stats;
    info!(
        final_time = %sim.now(),
        completed_jobs = stats.completed_jobs,
        busy_ticks = stats.busy_ticks,
        idle_ticks = stats.idle_ticks,
        selections = stats.selections,
        queries = stats.queries,
        lines = lines.len(),
        "done"
    );
}
