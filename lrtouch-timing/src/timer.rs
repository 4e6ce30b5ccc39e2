use chrono::{DateTime, SecondsFormat, Utc};
use std::time::{Duration, Instant};

/// Clock used for reaction times and feedback deadlines.
///
/// `now` is monotonic and unaffected by wall-clock adjustments; `wall_clock`
/// is only used to stamp log entries.
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, ts: Self::Timestamp) -> Duration;
    fn sleep(&self, d: Duration);
    fn wall_clock(&self) -> DateTime<Utc>;
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T09:30:00.125Z`
pub fn iso_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    pub start: Instant,
}

impl Timer for HighPrecisionTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn sleep(&self, d: Duration) {
        self.high_precision_sleep(d)
    }
    fn wall_clock(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn high_precision_sleep(&self, duration: Duration) {
        #[cfg(target_os = "linux")]
        self.linux_sleep(duration);
        #[cfg(not(target_os = "linux"))]
        std::thread::sleep(duration);
    }

    #[cfg(target_os = "linux")]
    fn linux_sleep(&self, duration: Duration) {
        use libc::{clock_nanosleep, timespec, CLOCK_MONOTONIC};

        let req = timespec {
            tv_sec: duration.as_secs() as libc::time_t,
            tv_nsec: duration.subsec_nanos() as libc::c_long,
        };

        unsafe {
            clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
        }
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_is_monotonic() {
        let timer = HighPrecisionTimer::new();
        let a = timer.now();
        timer.sleep(Duration::from_millis(2));
        let b = timer.now();
        assert!(b >= a + 1_000_000);
        assert!(timer.elapsed(a) >= Duration::from_millis(2));
    }

    #[test]
    fn elapsed_from_the_future_is_zero() {
        let timer = HighPrecisionTimer::new();
        assert_eq!(timer.elapsed(u64::MAX), Duration::ZERO);
    }

    #[test]
    fn iso_format_has_millis_and_z() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
            + chrono::Duration::milliseconds(125);
        assert_eq!(iso_timestamp(t), "2024-05-01T09:30:00.125Z");
    }
}
