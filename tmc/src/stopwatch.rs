use std::io::{self, Write};
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use tracing::{debug, trace};

use crate::{
    clock::{elapsed_between, Clock, MonotonicClock},
    hms::Hms,
    Error, StopwatchConfig, TResult,
};

/// Idle until `start`; `end` measures from that instant without resetting it.
#[derive(Debug, Default)]
pub struct Stopwatch<C = MonotonicClock> {
    clock: C,
    config: StopwatchConfig,
    start_instant: Option<Instant>,
    elapsed: Duration,
    measured: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started() -> TResult<Self> {
        let mut stopwatch = Self::new();
        stopwatch.start()?;
        Ok(stopwatch)
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: StopwatchConfig::default(),
            start_instant: None,
            elapsed: Duration::ZERO,
            measured: false,
        }
    }

    pub fn with_config(mut self, config: StopwatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Records the current instant, replacing any earlier one. The last
    /// measurement stays readable until the next `end`.
    pub fn start(&mut self) -> TResult<Instant> {
        let now = self.clock.now()?;
        if self.start_instant.replace(now).is_some() {
            debug!("stopwatch restarted");
        } else {
            debug!("stopwatch started");
        }
        Ok(now)
    }

    /// Measures the time since `start` and writes it to stdout.
    pub fn end(&mut self) -> TResult<Duration> {
        let elapsed = self.measure()?;
        if self.config.echo {
            self.echo()?;
        }
        Ok(elapsed)
    }

    pub fn end_to<W: Write>(&mut self, sink: &mut W) -> TResult<Duration> {
        let elapsed = self.measure()?;
        if self.config.echo {
            self.echo_to(sink)?;
        }
        Ok(elapsed)
    }

    fn measure(&mut self) -> TResult<Duration> {
        let start = self.start_instant.ok_or(Error::UninitializedTimer)?;
        let elapsed = elapsed_between(start, self.clock.now()?);

        self.elapsed = elapsed.duration;
        self.measured = true;

        let secs = self.elapsed.as_secs_f64();
        trace!(elapsed_secs = secs, "stopwatch end");
        if self.config.record_metrics {
            histogram!("stopwatch::elapsed_secs").record(secs);
            if elapsed.clamped {
                counter!("stopwatch::clamped").increment(1);
            }
        }
        Ok(self.elapsed)
    }

    /// Writes the last measurement to stdout without reading the clock.
    pub fn echo(&self) -> TResult<()> {
        let mut stdout = io::stdout().lock();
        self.echo_to(&mut stdout)
    }

    pub fn echo_to<W: Write>(&self, sink: &mut W) -> TResult<()> {
        writeln!(sink, "{}", self.hms())
            .and_then(|_| sink.flush())
            .map_err(|e| Error::Output(e.to_string()))
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn hms(&self) -> Hms {
        Hms::from_duration(self.elapsed)
    }

    pub fn is_running(&self) -> bool {
        self.start_instant.is_some()
    }

    pub fn has_measurement(&self) -> bool {
        self.measured
    }

    pub fn start_instant(&self) -> Option<Instant> {
        self.start_instant
    }
}
