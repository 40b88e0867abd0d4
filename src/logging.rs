// src/logging.rs
//
// Telemetry sinks for poolsim.
// - EventSink: trait used by the episode runner
// - NoopSink:  discards all events
// - FileSink:  writes one JSON line per step for offline analysis

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::action::Action;
use crate::state::PoolState;

/// Abstract sink for per-step telemetry.
pub trait EventSink {
    fn log_step(&mut self, step: u64, state: &PoolState, action: &Action, reward: f64);
}

/// Sink that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn log_step(&mut self, _step: u64, _state: &PoolState, _action: &Action, _reward: f64) {
        // intentionally no-op
    }
}

/// JSONL file sink.
///
/// Each step is written as a single JSON object on its own line. The
/// payload is small and encoded manually; logging failures are swallowed
/// so a full disk can never abort a run.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create a new sink writing to `path`.
    pub fn create(path: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl EventSink for FileSink {
    fn log_step(&mut self, step: u64, state: &PoolState, action: &Action, reward: f64) {
        let line = format!(
            "{{\
                \"step\":{},\
                \"liquidity\":{},\
                \"volatility\":{},\
                \"apy\":{},\
                \"reward\":{},\
                \"action\":\"{}\"\
            }}\n",
            step, state.liquidity, state.volatility, state.apy, reward, action,
        );

        let _ = self.writer.write_all(line.as_bytes());
        let _ = self.writer.flush();
    }
}
