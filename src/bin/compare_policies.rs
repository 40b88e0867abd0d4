// src/bin/compare_policies.rs
//
// Policy comparison harness: runs N episodes of a baseline policy against
// a manual APY schedule, each episode on fresh environments with derived
// seeds, and prints mean +/- std of total rewards for both sides.
//
// In library use the learned artifact is injected as a policy function;
// this CLI ships the rule-based baseline as the learned-side stand-in.
//
// Examples:
//   cargo run --bin compare_policies -- --episodes 10 --steps 500 --seed 1
//   cargo run --bin compare_policies -- --manual "20,20,0,-10" --csv rows.csv

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use poolsim::{
    run_comparison, Action, ComparisonConfig, ComparisonRow, HoldPolicy, OnlineStats, Policy,
    RulePolicy,
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
    name = "compare_policies",
    about = "poolsim policy comparison harness",
    version
)]
struct Args {
    /// Number of comparison episodes.
    #[arg(long, default_value_t = 10)]
    episodes: u32,

    /// Requested steps per episode.
    #[arg(long, default_value_t = 500)]
    steps: u64,

    /// Base seed. Episode i seeds the learned side with seed + 2i and the
    /// manual side with seed + 2i + 1.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Learned-side policy.
    #[arg(long, value_enum, default_value_t = PolicyArg::Rule)]
    policy: PolicyArg,

    /// Manual APY deltas in basis points, comma-separated. Shorter
    /// schedules hold their last element for the rest of the episode.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    manual: String,

    /// Write the aligned rows of the first episode to this CSV path.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Suppress per-episode lines; only print the final summary.
    #[arg(long)]
    quiet: bool,
}

/// Parse a comma-separated basis-point schedule into continuous actions.
fn parse_manual_schedule(s: &str) -> anyhow::Result<Vec<Action>> {
    let mut actions = Vec::new();
    for part in s.split(',') {
        let bp: f64 = part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid basis-point value '{}'", part.trim()))?;
        actions.push(Action::DeltaApy(bp / 10_000.0));
    }
    Ok(actions)
}

fn write_rows_csv(path: &Path, rows: &[ComparisonRow]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut f = File::create(path)?;
    writeln!(
        f,
        "step,rl_liquidity,rl_volatility,rl_apy,rl_reward,rl_action,\
         manual_liquidity,manual_volatility,manual_apy,manual_reward,manual_action"
    )?;
    for row in rows {
        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6},{},{:.6},{:.6},{:.6},{:.6},{}",
            row.step,
            row.rl_liquidity,
            row.rl_volatility,
            row.rl_apy,
            row.rl_reward,
            row.rl_action,
            row.manual_liquidity,
            row.manual_volatility,
            row.manual_apy,
            row.manual_reward,
            row.manual_action,
        )?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let manual_actions = parse_manual_schedule(&args.manual)?;

    let policy: Box<dyn Policy> = match args.policy {
        PolicyArg::Rule => Box::new(RulePolicy::new()),
        PolicyArg::Hold => Box::new(HoldPolicy),
    };

    let mut rl_stats = OnlineStats::new();
    let mut manual_stats = OnlineStats::new();
    let mut first_rows: Option<Vec<ComparisonRow>> = None;

    for i in 0..args.episodes {
        // Fresh environments and seeds each episode; no state carryover.
        let rl_seed = args.seed.wrapping_add(2 * i as u64);
        let manual_seed = rl_seed.wrapping_add(1);
        let config = ComparisonConfig::default()
            .with_num_steps(args.steps)
            .with_seeds(rl_seed, manual_seed);

        let rows = run_comparison(&manual_actions, policy.as_ref(), &config)?;
        if rows.is_empty() {
            println!("Episode {}: no comparison possible (zero aligned steps)", i + 1);
            continue;
        }

        let rl_total: f64 = rows.iter().map(|r| r.rl_reward).sum();
        let manual_total: f64 = rows.iter().map(|r| r.manual_reward).sum();
        rl_stats.add(rl_total);
        manual_stats.add(manual_total);

        if !args.quiet {
            println!(
                "Episode {}: RL reward = {:.3}, Manual reward = {:.3} ({} steps)",
                i + 1,
                rl_total,
                manual_total,
                rows.len()
            );
        }

        if first_rows.is_none() {
            first_rows = Some(rows);
        }
    }

    println!("=====================================");
    println!(
        "RL mean total reward     : {:.3} +/- {:.3}",
        rl_stats.mean(),
        rl_stats.stddev()
    );
    println!(
        "Manual mean total reward : {:.3} +/- {:.3}",
        manual_stats.mean(),
        manual_stats.stddev()
    );

    if let Some(path) = args.csv.as_ref() {
        match first_rows.as_deref() {
            Some(rows) => {
                write_rows_csv(path, rows)?;
                println!("Wrote {} aligned rows to {}", rows.len(), path.display());
            }
            None => println!("No rows to write to {}", path.display()),
        }
    }

    Ok(())
}
