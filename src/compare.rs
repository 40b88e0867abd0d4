// src/compare.rs
//
// Dual-trajectory policy comparison.
//
// Runs two independently-seeded environments under identical dynamics
// parameters: one stepped by a learned policy, one by a caller-supplied
// manual action sequence. Per-step records from both sides are truncated
// to their common length and merged into aligned rows for downstream
// charting or CSV export.
//
// The two environments never share a noise stream; each draws its own
// Gaussian samples, so the trajectories can diverge even under identical
// action sequences.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionError};
use crate::config::EnvConfig;
use crate::env::LiquidityEnv;
use crate::observation::Observation;
use crate::policy::{Policy, PolicyError};
use crate::trajectory::TransitionRecord;

/// Configuration for a comparison run.
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// Requested episode length; each side may stop earlier on termination.
    pub num_steps: u64,
    /// Seed for the learned-policy environment.
    pub rl_seed: u64,
    /// Seed for the manual environment. Distinct from `rl_seed` by default
    /// so the two noise streams stay independent.
    pub manual_seed: u64,
    /// Dynamics parameters shared by both environments.
    pub env: EnvConfig,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            num_steps: 500,
            rl_seed: 0,
            manual_seed: 1,
            env: EnvConfig::default(),
        }
    }
}

impl ComparisonConfig {
    pub fn with_num_steps(mut self, num_steps: u64) -> Self {
        self.num_steps = num_steps;
        self
    }

    /// Seed the learned side with `seed` and the manual side with `seed + 1`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rl_seed = seed;
        self.manual_seed = seed.wrapping_add(1);
        self
    }

    /// Explicit per-side seeds. Passing the same value to both makes the
    /// two noise streams identical, which pins the sides to each other
    /// under identical action sequences.
    pub fn with_seeds(mut self, rl_seed: u64, manual_seed: u64) -> Self {
        self.rl_seed = rl_seed;
        self.manual_seed = manual_seed;
        self
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = env;
        self
    }
}

/// One aligned step of the comparison table.
///
/// Learned-policy fields carry the `rl_` prefix, manual fields the
/// `manual_` prefix; both sides share the `step` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub step: u64,
    pub rl_liquidity: f64,
    pub rl_volatility: f64,
    pub rl_apy: f64,
    pub rl_reward: f64,
    pub rl_action: Action,
    pub manual_liquidity: f64,
    pub manual_volatility: f64,
    pub manual_apy: f64,
    pub manual_reward: f64,
    pub manual_action: Action,
}

/// Errors that abort a comparison run.
#[derive(Debug)]
pub enum CompareError {
    /// A manual or learned action failed to resolve to a defined delta.
    InvalidAction(ActionError),
    /// The policy call failed; the source error is carried unchanged,
    /// never wrapped or retried.
    Policy(PolicyError),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::InvalidAction(err) => write!(f, "{}", err),
            CompareError::Policy(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::InvalidAction(err) => Some(err),
            CompareError::Policy(err) => Some(err.as_ref()),
        }
    }
}

impl From<ActionError> for CompareError {
    fn from(err: ActionError) -> Self {
        CompareError::InvalidAction(err)
    }
}

/// Run a learned policy against a manual action sequence.
///
/// The manual sequence may be shorter than `num_steps`: its last element is
/// held constant for every later step. An empty sequence (or a zero-length
/// run on either side) yields an empty table, which callers must treat as
/// "no comparison possible" rather than an error.
pub fn run_comparison(
    manual_actions: &[Action],
    policy: &dyn Policy,
    config: &ComparisonConfig,
) -> Result<Vec<ComparisonRow>, CompareError> {
    if manual_actions.is_empty() || config.num_steps == 0 {
        return Ok(Vec::new());
    }

    // -------- learned trajectory --------
    let mut rl_env = LiquidityEnv::new(config.env.clone());
    rl_env.reset(Some(config.rl_seed));

    let mut rl_records: Vec<TransitionRecord> = Vec::new();
    for t in 0..config.num_steps {
        let obs = Observation::from_state(rl_env.state());
        let action = policy.act(&obs).map_err(CompareError::Policy)?;
        let result = rl_env.step(&action)?;
        rl_records.push(TransitionRecord::from_step(t, action, &result));
        if result.done {
            break;
        }
    }

    // -------- manual trajectory --------
    let mut manual_env = LiquidityEnv::new(config.env.clone());
    manual_env.reset(Some(config.manual_seed));

    let mut manual_records: Vec<TransitionRecord> = Vec::new();
    for t in 0..config.num_steps {
        // Hold the last element past the end of the sequence.
        let index = (t as usize).min(manual_actions.len() - 1);
        let action = manual_actions[index];
        let result = manual_env.step(&action)?;
        manual_records.push(TransitionRecord::from_step(t, action, &result));
        if result.done {
            break;
        }
    }

    // -------- align --------
    // zip truncates to the common length min(len(rl), len(manual)).
    let rows = rl_records
        .into_iter()
        .zip(manual_records)
        .map(|(rl, manual)| ComparisonRow {
            step: rl.step,
            rl_liquidity: rl.liquidity,
            rl_volatility: rl.volatility,
            rl_apy: rl.apy,
            rl_reward: rl.reward,
            rl_action: rl.action,
            manual_liquidity: manual.liquidity,
            manual_volatility: manual.volatility,
            manual_apy: manual.apy,
            manual_reward: manual.reward,
            manual_action: manual.action,
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FnPolicy, HoldPolicy};

    #[test]
    fn config_builder() {
        let config = ComparisonConfig::default()
            .with_num_steps(50)
            .with_seed(42);

        assert_eq!(config.num_steps, 50);
        assert_eq!(config.rl_seed, 42);
        assert_eq!(config.manual_seed, 43);

        let config = config.with_seeds(7, 7);
        assert_eq!(config.rl_seed, 7);
        assert_eq!(config.manual_seed, 7);
    }

    #[test]
    fn empty_manual_sequence_yields_empty_table() {
        let rows = run_comparison(&[], &HoldPolicy, &ComparisonConfig::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn zero_steps_yields_empty_table() {
        let config = ComparisonConfig::default().with_num_steps(0);
        let rows = run_comparison(&[Action::hold()], &HoldPolicy, &config).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn policy_error_propagates_unwrapped() {
        let policy = FnPolicy::new("broken", |_obs: &Observation| {
            Err("checkpoint mismatch".into())
        });
        let config = ComparisonConfig::default().with_num_steps(10);

        let err = run_comparison(&[Action::hold()], &policy, &config).unwrap_err();
        match err {
            CompareError::Policy(source) => {
                assert_eq!(source.to_string(), "checkpoint mismatch");
            }
            other => panic!("expected CompareError::Policy, got {:?}", other),
        }
    }

    #[test]
    fn invalid_manual_action_aborts_the_run() {
        let config = ComparisonConfig::default().with_num_steps(10);

        let err =
            run_comparison(&[Action::Discrete(9)], &HoldPolicy, &config).unwrap_err();
        match err {
            CompareError::InvalidAction(source) => {
                assert_eq!(source, ActionError::InvalidIndex { index: 9 });
            }
            other => panic!("expected CompareError::InvalidAction, got {:?}", other),
        }
    }
}
