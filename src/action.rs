// src/action.rs
//
// Action space for the liquidity-pool environment.
//
// Unit contract: every action, discrete or continuous, resolves to a
// fractional APY delta that is applied directly to the current APY.
// The discrete symbols index a fixed basis-point table; the continuous
// path applies the raw signed fraction with no discretization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fractional APY deltas for the five discrete actions:
/// -20 bp, -10 bp, 0 bp, +10 bp, +20 bp.
pub const APY_DELTA_TABLE: [f64; 5] = [-0.002, -0.001, 0.0, 0.001, 0.002];

/// Index of the "hold" (0 bp) discrete action.
pub const HOLD_INDEX: u8 = 2;

/// One control action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Discrete action index into [`APY_DELTA_TABLE`], {0..4}.
    Discrete(u8),
    /// Raw fractional APY delta (the manual / continuous path).
    DeltaApy(f64),
}

impl Action {
    /// Build a discrete action, rejecting out-of-range indices.
    pub fn from_index(index: u8) -> Result<Self, ActionError> {
        if (index as usize) < APY_DELTA_TABLE.len() {
            Ok(Action::Discrete(index))
        } else {
            Err(ActionError::InvalidIndex { index })
        }
    }

    /// The 0 bp discrete action.
    pub fn hold() -> Self {
        Action::Discrete(HOLD_INDEX)
    }

    /// Resolve this action to a fractional APY delta.
    ///
    /// An undefined discrete index or a non-finite continuous delta is an
    /// error; callers must apply no state change in that case.
    pub fn delta_apy(&self) -> Result<f64, ActionError> {
        match *self {
            Action::Discrete(index) => APY_DELTA_TABLE
                .get(index as usize)
                .copied()
                .ok_or(ActionError::InvalidIndex { index }),
            Action::DeltaApy(delta) => {
                if delta.is_finite() {
                    Ok(delta)
                } else {
                    Err(ActionError::NonFiniteDelta { delta })
                }
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Discrete(index) => write!(f, "{}", index),
            Action::DeltaApy(delta) => write!(f, "{}", delta),
        }
    }
}

/// Errors raised when an action cannot be resolved to a defined delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionError {
    /// Discrete index outside the defined mapping {0..4}.
    InvalidIndex { index: u8 },
    /// Continuous delta is NaN or infinite.
    NonFiniteDelta { delta: f64 },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidIndex { index } => {
                write!(
                    f,
                    "invalid action index {} (defined indices: 0..{})",
                    index,
                    APY_DELTA_TABLE.len() - 1
                )
            }
            ActionError::NonFiniteDelta { delta } => {
                write!(f, "non-finite APY delta {}", delta)
            }
        }
    }
}

impl std::error::Error for ActionError {}
