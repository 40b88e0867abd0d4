// src/reward.rs
//
// Scalar reward for the liquidity-pool environment.
//
// r_t = + lambda_liquidity  * liquidity
//       - lambda_volatility * volatility
//       - lambda_apy_cost   * apy
//
// Encourages deep liquidity and low volatility while penalising the cost
// of the yield paid out. The reward is a pure function of the post-update
// state: it reflects the state reached, not the action taken.

use serde::{Deserialize, Serialize};

use crate::state::PoolState;

/// Configurable weights for reward computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardWeights {
    /// Weight on liquidity (reward).
    pub lambda_liquidity: f64,
    /// Weight on volatility (penalty).
    pub lambda_volatility: f64,
    /// Weight on APY cost (penalty).
    pub lambda_apy_cost: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            lambda_liquidity: 1.0,
            lambda_volatility: 0.5,
            lambda_apy_cost: 0.2,
        }
    }
}

impl RewardWeights {
    /// Compute the scalar reward from the post-update state.
    pub fn compute(&self, state: &PoolState) -> f64 {
        self.lambda_liquidity * state.liquidity
            - self.lambda_volatility * state.volatility
            - self.lambda_apy_cost * state.apy
    }
}
