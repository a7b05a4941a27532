use std::time::{Duration, Instant};

/// One accepted submission per window, process-wide.
///
/// The timestamp moves only on success: rejected or failed attempts never
/// consume the window.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    last_success: Option<Instant>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_success: None,
        }
    }

    /// `Ok` when a submission may proceed, `Err(seconds)` with the remaining
    /// whole seconds (rounded up) otherwise.
    pub fn check(&self, now: Instant) -> Result<(), u64> {
        let Some(last) = self.last_success else {
            return Ok(());
        };
        let elapsed = now.saturating_duration_since(last);
        match self.window.checked_sub(elapsed) {
            None => Ok(()),
            Some(remaining) if remaining.is_zero() => Ok(()),
            Some(remaining) => Err((remaining.as_millis() as u64).div_ceil(1000)),
        }
    }

    /// Record a successful delivery.
    pub fn stamp(&mut self, now: Instant) {
        self.last_success = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_submission_is_always_allowed() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        assert!(limiter.check(Instant::now()).is_ok());
    }

    #[test]
    fn second_submission_inside_window_is_rejected_with_countdown() {
        let mut limiter = RateLimiter::new(Duration::from_secs(60));
        let t0 = Instant::now();
        limiter.stamp(t0);

        let err = limiter.check(t0 + Duration::from_secs(10)).unwrap_err();
        assert_eq!(err, 50);

        // sub-second remainders round up
        let err = limiter.check(t0 + Duration::from_millis(59_500)).unwrap_err();
        assert_eq!(err, 1);
    }

    #[test]
    fn window_elapse_allows_again() {
        let mut limiter = RateLimiter::new(Duration::from_secs(60));
        let t0 = Instant::now();
        limiter.stamp(t0);
        assert!(limiter.check(t0 + Duration::from_secs(60)).is_ok());
        assert!(limiter.check(t0 + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn failed_attempts_do_not_touch_the_window() {
        let mut limiter = RateLimiter::new(Duration::from_secs(60));
        let t0 = Instant::now();
        limiter.stamp(t0);

        // a rejected check at t0+30 must not extend the window
        assert!(limiter.check(t0 + Duration::from_secs(30)).is_err());
        assert!(limiter.check(t0 + Duration::from_secs(60)).is_ok());
    }
}
