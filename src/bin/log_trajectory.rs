// src/bin/log_trajectory.rs
//
// Run one policy episode and persist its trajectory as a row-oriented
// CSV table plus JSON metadata.
//
// Examples:
//   cargo run --bin log_trajectory -- --seed 42 --out data/trajectory
//   cargo run --bin log_trajectory -- --policy hold --steps 200 -v

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use poolsim::{
    run_episode, EnvConfig, EpisodeConfig, EventSink, FileSink, HoldPolicy, LiquidityEnv,
    NoopSink, Policy, RulePolicy, TrajectoryMetadata, TrajectoryWriter, TRAJECTORY_VERSION,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    /// Rule-based baseline (liquidity thresholds).
    Rule,
    /// Always hold the current APY.
    Hold,
}

#[derive(Debug, Parser)]
#[command(
    name = "log_trajectory",
    about = "poolsim trajectory logger: one episode, one CSV",
    version
)]
struct Args {
    /// Maximum number of steps to run.
    #[arg(long, default_value_t = 500)]
    steps: u64,

    /// Deterministic episode seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Policy driving the episode.
    #[arg(long, value_enum, default_value_t = PolicyArg::Rule)]
    policy: PolicyArg,

    /// Output directory for trajectory.csv and metadata.json.
    #[arg(long, default_value = "data/trajectory")]
    out: PathBuf,

    /// Optional JSONL per-step log.
    #[arg(long)]
    jsonl: Option<String>,

    /// Verbosity: -v (summary), -vv (per-step)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let policy: Box<dyn Policy> = match args.policy {
        PolicyArg::Rule => Box::new(RulePolicy::new()),
        PolicyArg::Hold => Box::new(HoldPolicy),
    };

    let mut sink: Box<dyn EventSink> = match args.jsonl.as_deref() {
        Some(path) => Box::new(FileSink::create(path)?),
        None => Box::new(NoopSink),
    };

    let mut env = LiquidityEnv::new(EnvConfig::default());
    let config = EpisodeConfig::default()
        .with_seed(args.seed)
        .with_max_steps(args.steps)
        .with_verbosity(args.verbose);

    let run = run_episode(&mut env, policy.as_ref(), &config, sink.as_mut())?;

    let metadata = TrajectoryMetadata {
        trajectory_version: TRAJECTORY_VERSION,
        seed: args.seed,
        policy_name: run.summary.policy_name.clone(),
        num_steps: run.summary.steps,
        total_reward: run.summary.total_reward,
    };
    TrajectoryWriter::new(&args.out).write(&run.records, &metadata)?;

    println!(
        "Saved {} steps to {}",
        run.records.len(),
        args.out.join("trajectory.csv").display()
    );

    Ok(())
}
