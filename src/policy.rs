// src/policy.rs
//
// Policy contract and baseline implementations.
//
// A policy maps an observation to an action and nothing else: no internal
// state between calls beyond what the observation encodes, safe to call
// repeatedly and from any thread. The externally-trained policy enters the
// crate through this trait (wrapped in FnPolicy), injected by the caller;
// the core never loads, trains, or serializes model artifacts.

use crate::action::Action;
use crate::observation::Observation;

/// Error raised inside a policy.
///
/// Passed through to the caller unchanged; the core never wraps or retries
/// a failing policy call.
pub type PolicyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Interface for all policy implementations.
pub trait Policy: Send + Sync {
    /// Stable name for logs and trajectory metadata.
    fn name(&self) -> &str;

    /// Compute an action for the given observation.
    ///
    /// Must be a pure function: same observation, same action.
    fn act(&self, obs: &Observation) -> Result<Action, PolicyError>;
}

/// Rule-based baseline:
/// - liquidity below the low threshold: raise APY strongly (+20 bp)
/// - liquidity above the high threshold: lower APY (-10 bp)
/// - otherwise: hold
pub struct RulePolicy {
    /// Below this, push yield up hard.
    pub low_liquidity: f64,
    /// Above this, ease yield down.
    pub high_liquidity: f64,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            low_liquidity: 0.4,
            high_liquidity: 0.6,
        }
    }
}

impl RulePolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for RulePolicy {
    fn name(&self) -> &str {
        "rule-v1"
    }

    fn act(&self, obs: &Observation) -> Result<Action, PolicyError> {
        let action = if obs.liquidity < self.low_liquidity {
            Action::Discrete(4) // +20 bp
        } else if obs.liquidity > self.high_liquidity {
            Action::Discrete(1) // -10 bp
        } else {
            Action::hold()
        };
        Ok(action)
    }
}

/// Identity baseline: always holds the current APY.
#[derive(Debug, Default, Clone, Copy)]
pub struct HoldPolicy;

impl Policy for HoldPolicy {
    fn name(&self) -> &str {
        "hold-v1"
    }

    fn act(&self, _obs: &Observation) -> Result<Action, PolicyError> {
        Ok(Action::hold())
    }
}

/// Adapter turning a plain closure into a [`Policy`].
///
/// This is the injection point for an externally-trained model: load the
/// artifact once at process start, wrap its predict function here, and pass
/// it to the comparison harness.
pub struct FnPolicy<F> {
    name: String,
    f: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(&Observation) -> Result<Action, PolicyError> + Send + Sync,
{
    pub fn new(name: &str, f: F) -> Self {
        Self {
            name: name.to_string(),
            f,
        }
    }
}

impl<F> Policy for FnPolicy<F>
where
    F: Fn(&Observation) -> Result<Action, PolicyError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&self, obs: &Observation) -> Result<Action, PolicyError> {
        (self.f)(obs)
    }
}
