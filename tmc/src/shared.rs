use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::{
    clock::{Clock, MonotonicClock},
    stopwatch::Stopwatch,
    TResult,
};

/// Cloneable handle that serializes `start` and `end` across threads.
#[derive(Debug)]
pub struct SharedStopwatch<C = MonotonicClock> {
    inner: Arc<Mutex<Stopwatch<C>>>,
}

impl<C> Clone for SharedStopwatch<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Default> Default for SharedStopwatch<C> {
    fn default() -> Self {
        Self::from(Stopwatch::default())
    }
}

impl<C> From<Stopwatch<C>> for SharedStopwatch<C> {
    fn from(stopwatch: Stopwatch<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stopwatch)),
        }
    }
}

impl<C: Clock> SharedStopwatch<C> {
    // A panic while holding the lock cannot leave the start instant or the
    // elapsed value half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Stopwatch<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self) -> TResult<Instant> {
        self.lock().start()
    }

    pub fn end(&self) -> TResult<Duration> {
        self.lock().end()
    }

    pub fn end_to<W: Write>(&self, sink: &mut W) -> TResult<Duration> {
        self.lock().end_to(sink)
    }

    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed()
    }

    pub fn has_measurement(&self) -> bool {
        self.lock().has_measurement()
    }
}
