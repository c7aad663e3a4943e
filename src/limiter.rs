//! Dual-window rate limiter.
//!
//! Enforces independent per-minute and per-hour ceilings per caller.
//! Windows are fixed-size and roll on demand: when a window's reset time
//! has passed, its counter restarts before the new request is evaluated.
//! Rejection is terminal and advisory — nothing is queued or retried.
//!
//! State lives behind one `Mutex` so concurrent `allow` calls never lose
//! counter updates.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

use crate::cache::NowFn;

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 3600;

fn wall_clock() -> NowFn {
    Box::new(|| Utc::now().timestamp())
}

struct CallerWindows {
    minute_count: u32,
    minute_reset_at: i64,
    hour_count: u32,
    hour_reset_at: i64,
}

/// Remaining-quota snapshot, stamped on responses as `X-RateLimit-*`
/// headers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuotaInfo {
    pub minute_limit: u32,
    pub remaining_minute: u32,
    pub hour_limit: u32,
    pub remaining_hour: u32,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone)]
pub enum Decision {
    Allowed(QuotaInfo),
    Rejected {
        retry_after_seconds: i64,
        message: String,
    },
}

/// Per-caller dual-window rate limiter.
pub struct RateLimiter {
    per_minute: u32,
    per_hour: u32,
    callers: Mutex<HashMap<String, CallerWindows>>,
    now_fn: NowFn,
}

impl RateLimiter {
    pub fn new(per_minute: u32, per_hour: u32) -> Self {
        Self::with_clock(per_minute, per_hour, wall_clock())
    }

    /// Construct with an injected clock so tests can roll windows without
    /// sleeping.
    pub fn with_clock(per_minute: u32, per_hour: u32, now_fn: NowFn) -> Self {
        Self {
            per_minute,
            per_hour,
            callers: Mutex::new(HashMap::new()),
            now_fn,
        }
    }

    /// Evaluate one request from `caller`.
    ///
    /// Both counters are incremented; if a ceiling would be exceeded, the
    /// exceeded counter's increment is rolled back and the request is
    /// rejected with the remaining seconds of the binding window.
    pub fn allow(&self, caller: &str) -> Decision {
        let now = (self.now_fn)();
        let mut callers = self.callers.lock().unwrap();

        let windows = callers.entry(caller.to_string()).or_insert(CallerWindows {
            minute_count: 0,
            minute_reset_at: now + MINUTE_SECS,
            hour_count: 0,
            hour_reset_at: now + HOUR_SECS,
        });

        if now >= windows.minute_reset_at {
            windows.minute_count = 0;
            windows.minute_reset_at = now + MINUTE_SECS;
        }
        if now >= windows.hour_reset_at {
            windows.hour_count = 0;
            windows.hour_reset_at = now + HOUR_SECS;
        }

        windows.minute_count += 1;
        windows.hour_count += 1;

        if windows.minute_count > self.per_minute {
            windows.minute_count -= 1;
            return Decision::Rejected {
                retry_after_seconds: (windows.minute_reset_at - now).max(0),
                message: format!(
                    "Rate limit exceeded: {} requests per minute",
                    self.per_minute
                ),
            };
        }

        if windows.hour_count > self.per_hour {
            windows.hour_count -= 1;
            return Decision::Rejected {
                retry_after_seconds: (windows.hour_reset_at - now).max(0),
                message: format!("Rate limit exceeded: {} requests per hour", self.per_hour),
            };
        }

        Decision::Allowed(QuotaInfo {
            minute_limit: self.per_minute,
            remaining_minute: self.per_minute - windows.minute_count,
            hour_limit: self.per_hour,
            remaining_hour: self.per_hour - windows.hour_count,
        })
    }

    /// Current quota for `caller` without consuming any.
    pub fn quota(&self, caller: &str) -> QuotaInfo {
        let now = (self.now_fn)();
        let callers = self.callers.lock().unwrap();

        let (minute_used, hour_used) = match callers.get(caller) {
            Some(w) => {
                let minute = if now >= w.minute_reset_at { 0 } else { w.minute_count };
                let hour = if now >= w.hour_reset_at { 0 } else { w.hour_count };
                (minute, hour)
            }
            None => (0, 0),
        };

        QuotaInfo {
            minute_limit: self.per_minute,
            remaining_minute: self.per_minute.saturating_sub(minute_used),
            hour_limit: self.per_hour,
            remaining_hour: self.per_hour.saturating_sub(hour_used),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Manually driven clock so each test rolls windows independently.
    fn manual_clock() -> (Arc<AtomicI64>, NowFn) {
        let time = Arc::new(AtomicI64::new(5_000_000));
        let handle = time.clone();
        (time, Box::new(move || handle.load(Ordering::SeqCst)))
    }

    #[test]
    fn test_61st_call_rejected_within_minute() {
        let (_, clock) = manual_clock();
        let limiter = RateLimiter::with_clock(60, 100_000, clock);
        for _ in 0..60 {
            assert!(matches!(limiter.allow("ip_a"), Decision::Allowed(_)));
        }
        match limiter.allow("ip_a") {
            Decision::Rejected {
                retry_after_seconds,
                message,
            } => {
                assert!(retry_after_seconds <= 60);
                assert!(retry_after_seconds >= 0);
                assert!(message.contains("per minute"));
            }
            Decision::Allowed(_) => panic!("61st call should be rejected"),
        }
    }

    #[test]
    fn test_window_resets_after_elapse() {
        let (time, clock) = manual_clock();
        let limiter = RateLimiter::with_clock(2, 100_000, clock);
        assert!(matches!(limiter.allow("ip_b"), Decision::Allowed(_)));
        assert!(matches!(limiter.allow("ip_b"), Decision::Allowed(_)));
        assert!(matches!(limiter.allow("ip_b"), Decision::Rejected { .. }));

        time.fetch_add(61, Ordering::SeqCst);

        // Fresh window reflects only post-reset calls
        match limiter.allow("ip_b") {
            Decision::Allowed(quota) => assert_eq!(quota.remaining_minute, 1),
            Decision::Rejected { .. } => panic!("call after window elapse should pass"),
        }
    }

    #[test]
    fn test_hour_ceiling_independent_of_minute() {
        let (time, clock) = manual_clock();
        let limiter = RateLimiter::with_clock(10, 15, clock);
        let mut allowed = 0;
        // Spread calls across minutes so only the hour ceiling binds
        for _ in 0..4 {
            for _ in 0..5 {
                if matches!(limiter.allow("ip_c"), Decision::Allowed(_)) {
                    allowed += 1;
                }
            }
            time.fetch_add(61, Ordering::SeqCst);
        }
        assert_eq!(allowed, 15);

        match limiter.allow("ip_c") {
            Decision::Rejected {
                message,
                retry_after_seconds,
            } => {
                assert!(message.contains("per hour"));
                assert!(retry_after_seconds <= 3600);
            }
            Decision::Allowed(_) => panic!("hour ceiling should bind"),
        }
    }

    #[test]
    fn test_callers_are_independent() {
        let (_, clock) = manual_clock();
        let limiter = RateLimiter::with_clock(1, 100, clock);
        assert!(matches!(limiter.allow("alice"), Decision::Allowed(_)));
        assert!(matches!(limiter.allow("alice"), Decision::Rejected { .. }));
        assert!(matches!(limiter.allow("bob"), Decision::Allowed(_)));
    }

    #[test]
    fn test_rejection_rolls_back_exceeded_counter() {
        let (_, clock) = manual_clock();
        let limiter = RateLimiter::with_clock(3, 100, clock);
        for _ in 0..3 {
            let _ = limiter.allow("ip_d");
        }
        // Repeated rejected attempts must not grow the minute counter
        for _ in 0..50 {
            assert!(matches!(limiter.allow("ip_d"), Decision::Rejected { .. }));
        }
        let quota = limiter.quota("ip_d");
        assert_eq!(quota.remaining_minute, 0);
    }

    #[test]
    fn test_quota_does_not_consume() {
        let (_, clock) = manual_clock();
        let limiter = RateLimiter::with_clock(5, 100, clock);
        let _ = limiter.allow("ip_e");
        let q1 = limiter.quota("ip_e");
        let q2 = limiter.quota("ip_e");
        assert_eq!(q1.remaining_minute, 4);
        assert_eq!(q2.remaining_minute, 4);
    }

    #[test]
    fn test_concurrent_allows_never_exceed_limit() {
        let (_, clock) = manual_clock();
        let limiter = Arc::new(RateLimiter::with_clock(100, 100_000, clock));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let limiter = limiter.clone();
            handles.push(std::thread::spawn(move || {
                let mut allowed = 0u32;
                for _ in 0..50 {
                    if matches!(limiter.allow("shared"), Decision::Allowed(_)) {
                        allowed += 1;
                    }
                }
                allowed
            }));
        }
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 100);
    }
}
