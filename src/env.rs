// src/env.rs
//
// Gym-style liquidity-pool environment.
//
// Provides the standard RL interface:
// - reset(seed) -> observation
// - step(action) -> (observation, reward, done, info)
//
// Dynamics, in fixed order per step:
// 1. apy        <- clamp(apy + delta_apy, min_apy, max_apy)
// 2. liquidity  <- clamp(liquidity + k_liq * (apy - anchor_apy), 0, 1)
// 3. volatility <- clamp(volatility - k_vol * liquidity + eps, 0, 1),
//    eps ~ Normal(0, vol_noise_std) drawn fresh from this environment's
//    own stream every step (the only source of stochasticity)
// 4. reward from the post-update state
// 5. terminate once step_count reaches max_steps
//
// All state transitions are deterministic given the seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionError};
use crate::config::EnvConfig;
use crate::observation::Observation;
use crate::state::PoolState;

/// Episode termination reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Step budget exhausted; the only termination condition.
    EndOfEpisode,
}

/// Result of a single environment step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// The observation after taking the action.
    pub observation: Observation,
    /// The reward for this step.
    pub reward: f64,
    /// Whether the episode has terminated.
    pub done: bool,
    /// Auxiliary step metadata; carries no dynamics inputs.
    pub info: StepInfo,
}

/// Auxiliary information returned from a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepInfo {
    /// Step index after this transition (equals state.step_count).
    pub step: u64,
    /// Termination reason if done.
    pub termination_reason: Option<TerminationReason>,
}

/// Simulated liquidity-pool environment.
///
/// Owns its state and its noise stream exclusively; two environments never
/// share randomness, so side-by-side runs stay independently reproducible.
pub struct LiquidityEnv {
    cfg: EnvConfig,
    state: PoolState,
    rng: ChaCha8Rng,
    seed: u64,
    done: bool,
}

impl LiquidityEnv {
    /// Create a new environment. Call [`reset`](Self::reset) before stepping.
    pub fn new(cfg: EnvConfig) -> Self {
        Self {
            cfg,
            state: PoolState::initial(),
            rng: ChaCha8Rng::seed_from_u64(0),
            seed: 0,
            done: false,
        }
    }

    /// Reset the environment with an optional seed.
    ///
    /// `None` draws a fresh seed from the current stream, so repeated
    /// unseeded resets still produce distinct noise streams. Returns the
    /// initial observation; there are no failure modes.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        let seed = seed.unwrap_or_else(|| self.rng.gen());
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);

        self.state = PoolState::initial();
        self.done = false;

        Observation::from_state(&self.state)
    }

    /// Take a step in the environment.
    ///
    /// A malformed action is an error and leaves the state unmutated.
    /// Stepping a finished episode returns the terminal observation with
    /// zero reward and `done = true`, again without mutating state.
    pub fn step(&mut self, action: &Action) -> Result<StepResult, ActionError> {
        // Resolve the delta before touching state so a malformed action
        // cannot leave a partial update behind.
        let delta_apy = action.delta_apy()?;

        if self.done {
            return Ok(StepResult {
                observation: Observation::from_state(&self.state),
                reward: 0.0,
                done: true,
                info: StepInfo {
                    step: self.state.step_count,
                    termination_reason: Some(TerminationReason::EndOfEpisode),
                },
            });
        }

        let cfg = &self.cfg;
        let state = &mut self.state;

        // 1) APY moves by the resolved delta, bounded.
        state.apy = (state.apy + delta_apy).clamp(cfg.min_apy, cfg.max_apy);

        // 2) Yield above the anchor attracts liquidity; below repels it.
        let liquidity_change = cfg.liquidity_sensitivity * (state.apy - cfg.anchor_apy);
        state.liquidity = (state.liquidity + liquidity_change).clamp(0.0, 1.0);

        // 3) Deep liquidity dampens volatility; one fresh Gaussian draw
        //    per step from this environment's own stream.
        let noise: f64 = StandardNormal.sample(&mut self.rng);
        let vol_noise = noise * cfg.vol_noise_std;
        state.volatility =
            (state.volatility - cfg.vol_damping * state.liquidity + vol_noise).clamp(0.0, 1.0);

        // 4) Reward reflects the state reached, not the action taken.
        let reward = cfg.reward.compute(state);

        // 5) Count the step and check the only termination condition.
        state.step_count += 1;
        self.done = state.step_count >= cfg.max_steps;

        Ok(StepResult {
            observation: Observation::from_state(state),
            reward,
            done: self.done,
            info: StepInfo {
                step: state.step_count,
                termination_reason: self.done.then_some(TerminationReason::EndOfEpisode),
            },
        })
    }

    /// Current state (for testing and telemetry).
    pub fn state(&self) -> &PoolState {
        &self.state
    }

    /// Environment configuration.
    pub fn config(&self) -> &EnvConfig {
        &self.cfg
    }

    /// Seed of the current episode.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Steps executed since the last reset.
    pub fn step_count(&self) -> u64 {
        self.state.step_count
    }

    /// Whether the episode has terminated.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
