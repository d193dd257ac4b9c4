use std::time::{Duration, Instant};

use tracing::warn;

use crate::TResult;

/// Monotonic time source read by a [`crate::Stopwatch`].
pub trait Clock: Send + Sync {
    fn now(&self) -> TResult<Instant>;
}

/// `std::time::Instant`, unaffected by wall-clock adjustments.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> TResult<Instant> {
        Ok(Instant::now())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub duration: Duration,
    // `now` preceded `start` and the difference was dropped.
    pub clamped: bool,
}

/// Non-negative time between `start` and `now`. A reading behind `start`
/// yields zero rather than a negative duration.
pub fn elapsed_between(start: Instant, now: Instant) -> Elapsed {
    match now.checked_duration_since(start) {
        Some(duration) => Elapsed {
            duration,
            clamped: false,
        },
        None => {
            warn!(
                behind = ?start.duration_since(now),
                "clock reading precedes start instant, clamping elapsed to zero"
            );
            Elapsed {
                duration: Duration::ZERO,
                clamped: true,
            }
        }
    }
}


#[cfg(test)]
mod test {
    use super::manual::ManualClock;
    use super::*;
    use crate::Error;

    #[test]
    fn monotonic_clock_never_goes_back() {
        let clock = MonotonicClock;
        let a = clock.now().unwrap();
        let b = clock.now().unwrap();
        assert!(b >= a);
        assert!(!elapsed_between(a, b).clamped);
    }

    #[test]
    fn elapsed_between_forward() {
        let clock = ManualClock::new();
        let start = clock.now().unwrap();
        clock.advance(Duration::from_millis(1500));
        let got = elapsed_between(start, clock.now().unwrap());
        assert_eq!(
            got,
            Elapsed {
                duration: Duration::from_millis(1500),
                clamped: false,
            }
        );
    }

    #[test]
    fn elapsed_between_clamps_backwards_reading() {
        let clock = ManualClock::new();
        let start = clock.now().unwrap();
        clock.rewind(Duration::from_secs(3));
        let got = elapsed_between(start, clock.now().unwrap());
        assert_eq!(got.duration, Duration::ZERO);
        assert!(got.clamped);
    }

    #[test]
    fn elapsed_between_same_instant() {
        let now = Instant::now();
        let got = elapsed_between(now, now);
        assert_eq!(got.duration, Duration::ZERO);
        assert!(!got.clamped);
    }

    #[test]
    fn manual_clock_unavailable() {
        let clock = ManualClock::new();
        clock.set_unavailable(true);
        assert_eq!(clock.now(), Err(Error::ClockUnavailable));
        clock.set_unavailable(false);
        assert!(clock.now().is_ok());
    }
}
