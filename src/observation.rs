// src/observation.rs
//
// Read-only observation exposed to policies.
//
// Always exactly the current state's (liquidity, volatility, apy), built
// after reset and after every step. Serializable for logging and replay;
// field order is fixed so canonical JSON is stable for determinism checks.

use serde::{Deserialize, Serialize};

use crate::state::PoolState;

/// Snapshot of the observable market state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Fraction of maximum pool depth, [0, 1].
    pub liquidity: f64,
    /// Normalized volatility, [0, 1].
    pub volatility: f64,
    /// Current annual yield, [min_apy, max_apy].
    pub apy: f64,
}

impl Observation {
    /// Build an observation from the current state.
    ///
    /// This is the canonical way to create policy input; it is
    /// deterministic given the same state.
    pub fn from_state(state: &PoolState) -> Self {
        Self {
            liquidity: state.liquidity,
            volatility: state.volatility,
            apy: state.apy,
        }
    }

    /// Flat feature vector in stable order, for numeric policy inputs.
    pub fn as_array(&self) -> [f64; 3] {
        [self.liquidity, self.volatility, self.apy]
    }

    /// Canonical JSON bytes for byte-identical determinism comparisons.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        // serde_json preserves struct field order
        serde_json::to_vec(self)
    }
}
