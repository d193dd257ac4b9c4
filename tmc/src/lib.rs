use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    #[error("monotonic clock is unavailable")]
    ClockUnavailable,
    #[error("stopwatch ended before it was started")]
    UninitializedTimer,
    #[error("failed to write elapsed time: {0}")]
    Output(String),
}

pub type TResult<T> = Result<T, Error>;

#[derive(Debug, Clone)]
pub struct StopwatchConfig {
    /// Write the formatted elapsed time to the sink on every `end`.
    pub echo: bool,
    pub record_metrics: bool,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            echo: true,
            record_metrics: true,
        }
    }
}

mod clock;
mod hms;
mod shared;
mod stopwatch;

pub use clock::{elapsed_between, Clock, Elapsed, MonotonicClock};
pub use hms::{format_elapsed, Hms};
pub use shared::SharedStopwatch;
pub use stopwatch::Stopwatch;
