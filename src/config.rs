// src/config.rs
//
// Central configuration for the poolsim environment.
// This is the single source of truth for the market dynamics constants
// (APY bounds, liquidity/volatility coupling, noise) and the reward
// weights. Defaults reproduce the reference dynamics exactly.

use serde::{Deserialize, Serialize};

use crate::reward::RewardWeights;

/// Environment configuration.
///
/// One `EnvConfig` is shared (by clone) between the two sides of a
/// comparison run so both environments evolve under identical dynamics
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Lower APY bound (2%).
    pub min_apy: f64,
    /// Upper APY bound (25%).
    pub max_apy: f64,
    /// Neutral reference yield. APY above the anchor pulls liquidity in,
    /// below pushes it out.
    pub anchor_apy: f64,
    /// Liquidity response per unit of (apy - anchor_apy).
    pub liquidity_sensitivity: f64,
    /// Volatility damping per unit of liquidity.
    pub vol_damping: f64,
    /// Std-dev of the per-step Gaussian volatility noise.
    pub vol_noise_std: f64,
    /// Episode length bound; the only termination condition.
    pub max_steps: u64,
    /// Reward weights applied to the post-update state.
    pub reward: RewardWeights,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            min_apy: 0.02,
            max_apy: 0.25,
            anchor_apy: 0.05,
            liquidity_sensitivity: 0.5,
            vol_damping: 0.1,
            vol_noise_std: 0.01,
            max_steps: 500,
            reward: RewardWeights::default(),
        }
    }
}

impl EnvConfig {
    /// Config with the noise term removed (for deterministic tests).
    pub fn noiseless() -> Self {
        Self {
            vol_noise_std: 0.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_constants() {
        let cfg = EnvConfig::default();

        assert_eq!(cfg.min_apy, 0.02);
        assert_eq!(cfg.max_apy, 0.25);
        assert_eq!(cfg.anchor_apy, 0.05);
        assert_eq!(cfg.liquidity_sensitivity, 0.5);
        assert_eq!(cfg.vol_damping, 0.1);
        assert_eq!(cfg.vol_noise_std, 0.01);
        assert_eq!(cfg.max_steps, 500);
    }

    #[test]
    fn noiseless_only_zeroes_noise() {
        let cfg = EnvConfig::noiseless();

        assert_eq!(cfg.vol_noise_std, 0.0);
        assert_eq!(cfg.max_steps, EnvConfig::default().max_steps);
    }
}
