// src/episode.rs
//
// Single-policy episode runner.
//
// Drives one environment from reset to termination under a policy,
// collecting per-step transition records and a summary. This is the
// building block behind trajectory logging and policy evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::ActionError;
use crate::env::{LiquidityEnv, TerminationReason};
use crate::logging::EventSink;
use crate::observation::Observation;
use crate::policy::{Policy, PolicyError};
use crate::trajectory::TransitionRecord;

/// Configuration for one episode run.
#[derive(Debug, Clone)]
pub struct EpisodeConfig {
    /// Seed for deterministic simulation.
    pub seed: u64,
    /// Maximum number of steps to run; the environment may terminate
    /// earlier by its own step budget.
    pub max_steps: u64,
    /// Verbosity level (0=quiet, 1=summary, 2=per-step).
    pub verbosity: u8,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_steps: 500,
            verbosity: 0,
        }
    }
}

impl EpisodeConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// Summary of a completed episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Name of the policy that ran.
    pub policy_name: String,
    /// Seed used.
    pub seed: u64,
    /// Steps executed.
    pub steps: u64,
    /// Sum of per-step rewards.
    pub total_reward: f64,
    /// Termination reason, if the environment terminated.
    pub termination: Option<TerminationReason>,
    /// Final liquidity.
    pub final_liquidity: f64,
    /// Final volatility.
    pub final_volatility: f64,
    /// Final APY.
    pub final_apy: f64,
}

/// A completed episode: its records plus the summary.
#[derive(Debug, Clone)]
pub struct EpisodeRun {
    pub records: Vec<TransitionRecord>,
    pub summary: EpisodeSummary,
}

/// Errors that abort an episode run.
#[derive(Debug)]
pub enum EpisodeError {
    /// An action failed to resolve to a defined delta.
    InvalidAction(ActionError),
    /// The policy call failed; source carried unchanged.
    Policy(PolicyError),
}

impl fmt::Display for EpisodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodeError::InvalidAction(err) => write!(f, "{}", err),
            EpisodeError::Policy(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EpisodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EpisodeError::InvalidAction(err) => Some(err),
            EpisodeError::Policy(err) => Some(err.as_ref()),
        }
    }
}

impl From<ActionError> for EpisodeError {
    fn from(err: ActionError) -> Self {
        EpisodeError::InvalidAction(err)
    }
}

/// Run a complete episode of `policy` in `env`.
///
/// Resets the environment with the configured seed, then steps until the
/// environment terminates or `max_steps` is reached. Every step is logged
/// to the sink.
pub fn run_episode(
    env: &mut LiquidityEnv,
    policy: &dyn Policy,
    config: &EpisodeConfig,
    sink: &mut dyn EventSink,
) -> Result<EpisodeRun, EpisodeError> {
    env.reset(Some(config.seed));

    let mut records: Vec<TransitionRecord> = Vec::new();
    let mut total_reward = 0.0;
    let mut termination: Option<TerminationReason> = None;

    for t in 0..config.max_steps {
        let obs = Observation::from_state(env.state());
        let action = policy.act(&obs).map_err(EpisodeError::Policy)?;
        let result = env.step(&action)?;

        total_reward += result.reward;
        sink.log_step(t, env.state(), &action, result.reward);

        if config.verbosity >= 2 {
            println!(
                "step {}: liquidity={:.3} volatility={:.3} apy={:.4} reward={:.4}",
                t,
                result.observation.liquidity,
                result.observation.volatility,
                result.observation.apy,
                result.reward,
            );
        }

        records.push(TransitionRecord::from_step(t, action, &result));

        if result.done {
            termination = result.info.termination_reason;
            break;
        }
    }

    let state = env.state();
    let summary = EpisodeSummary {
        policy_name: policy.name().to_string(),
        seed: config.seed,
        steps: records.len() as u64,
        total_reward,
        termination,
        final_liquidity: state.liquidity,
        final_volatility: state.volatility,
        final_apy: state.apy,
    };

    if config.verbosity >= 1 {
        print_summary(&summary);
    }

    Ok(EpisodeRun { records, summary })
}

fn print_summary(summary: &EpisodeSummary) {
    println!();
    println!("=== Episode Summary ===");
    println!("Policy: {}", summary.policy_name);
    println!("Seed: {}", summary.seed);
    println!("Steps: {}", summary.steps);
    println!("Total reward: {:.4}", summary.total_reward);
    println!(
        "Final state: liquidity={:.3} volatility={:.3} apy={:.4}",
        summary.final_liquidity, summary.final_volatility, summary.final_apy
    );
    match summary.termination {
        Some(reason) => println!("Termination: {:?}", reason),
        None => println!("Termination: step budget (caller)"),
    }
}
