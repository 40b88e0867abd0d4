// src/state.rs
//
// Mutable market state for a single liquidity-pool environment.
//
// Exactly one environment owns a PoolState at a time. It is created at
// reset, mutated in place by step, and discarded when the episode ends;
// nothing persists across episodes.

use serde::{Deserialize, Serialize};

/// Liquidity at reset (fraction of maximum pool depth).
pub const INITIAL_LIQUIDITY: f64 = 0.5;
/// Volatility at reset (normalized).
pub const INITIAL_VOLATILITY: f64 = 0.2;
/// APY at reset (5%).
pub const INITIAL_APY: f64 = 0.05;

/// Market state of one simulated pool.
///
/// Invariant: `liquidity` and `volatility` stay in [0, 1] and `apy` stays
/// in [min_apy, max_apy] at every observation point; the environment clamps
/// after each update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    /// Fraction of maximum pool depth, [0, 1].
    pub liquidity: f64,
    /// Normalized price/return variability, [0, 1].
    pub volatility: f64,
    /// Current annual yield offered, [min_apy, max_apy].
    pub apy: f64,
    /// Steps executed since the last reset.
    pub step_count: u64,
}

impl PoolState {
    /// State at the start of every episode: moderate conditions.
    pub fn initial() -> Self {
        Self {
            liquidity: INITIAL_LIQUIDITY,
            volatility: INITIAL_VOLATILITY,
            apy: INITIAL_APY,
            step_count: 0,
        }
    }
}

impl Default for PoolState {
    fn default() -> Self {
        Self::initial()
    }
}
