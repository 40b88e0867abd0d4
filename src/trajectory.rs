// src/trajectory.rs
//
// Per-step transition records and row-oriented trajectory persistence.
//
// An episode's records form an ordered, append-only sequence, immutable
// once the run completes. The writer emits:
// - {output_dir}/trajectory.csv  - one row per step, ascending by step
// - {output_dir}/metadata.json   - versioned run metadata

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::env::StepResult;

/// Current trajectory format version.
/// Increment when changing the record schema.
pub const TRAJECTORY_VERSION: u32 = 1;

/// CSV column order; the only contract consumers rely on.
pub const CSV_HEADER: &str = "step,liquidity,volatility,apy,reward,action";

/// A single executed step: post-update observation fields, reward, and the
/// action that produced them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub step: u64,
    pub liquidity: f64,
    pub volatility: f64,
    pub apy: f64,
    pub reward: f64,
    pub action: Action,
}

impl TransitionRecord {
    /// Build a record from a step result.
    pub fn from_step(step: u64, action: Action, result: &StepResult) -> Self {
        Self {
            step,
            liquidity: result.observation.liquidity,
            volatility: result.observation.volatility,
            apy: result.observation.apy,
            reward: result.reward,
            action,
        }
    }

    /// One CSV row matching [`CSV_HEADER`].
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{:.6},{:.6},{:.6},{:.6},{}",
            self.step, self.liquidity, self.volatility, self.apy, self.reward, self.action
        )
    }
}

/// Metadata for a persisted trajectory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryMetadata {
    /// Trajectory format version.
    pub trajectory_version: u32,
    /// Seed of the recorded episode.
    pub seed: u64,
    /// Name of the policy that produced the trajectory.
    pub policy_name: String,
    /// Number of recorded steps.
    pub num_steps: u64,
    /// Sum of per-step rewards.
    pub total_reward: f64,
}

/// Writes trajectory data to files.
pub struct TrajectoryWriter {
    output_dir: PathBuf,
}

impl TrajectoryWriter {
    /// Create a new writer with the given output directory.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write records and metadata.
    ///
    /// Records are expected in ascending step order (episodes append in
    /// order, so callers normally get this for free).
    pub fn write(
        &self,
        records: &[TransitionRecord],
        metadata: &TrajectoryMetadata,
    ) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)?;

        let metadata_json = serde_json::to_string_pretty(metadata)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.output_dir.join("metadata.json"), metadata_json)?;

        let file = File::create(self.output_dir.join("trajectory.csv"))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", CSV_HEADER)?;
        for record in records {
            writeln!(writer, "{}", record.to_csv_row())?;
        }
        writer.flush()?;

        Ok(())
    }
}
