use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::timer::Timer;

/// Clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and hand
/// another to the code under test.
#[derive(Debug, Clone)]
pub struct ManualTimer {
    now_ns: Arc<AtomicU64>,
    wall_origin: DateTime<Utc>,
}

impl ManualTimer {
    pub fn new(wall_origin: DateTime<Utc>) -> Self {
        Self {
            now_ns: Arc::new(AtomicU64::new(0)),
            wall_origin,
        }
    }

    pub fn advance(&self, d: Duration) {
        self.now_ns.fetch_add(d.as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set_ns(&self, ns: u64) {
        self.now_ns.store(ns, Ordering::SeqCst);
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Timer for ManualTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn sleep(&self, d: Duration) {
        self.advance(d)
    }
    fn wall_clock(&self) -> DateTime<Utc> {
        self.wall_origin + chrono::Duration::nanoseconds(self.now() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::iso_timestamp;

    #[test]
    fn clones_share_the_clock() {
        let timer = ManualTimer::default();
        let handle = timer.clone();
        handle.advance_ms(250);
        assert_eq!(timer.now(), 250_000_000);
        assert_eq!(timer.elapsed(50_000_000), Duration::from_millis(200));
    }

    #[test]
    fn sleep_advances_and_wall_clock_follows() {
        let timer = ManualTimer::default();
        timer.sleep(Duration::from_millis(1500));
        assert_eq!(iso_timestamp(timer.wall_clock()), "1970-01-01T00:00:01.500Z");
    }

    #[test]
    fn elapsed_never_negative() {
        let timer = ManualTimer::default();
        timer.set_ns(10);
        assert_eq!(timer.elapsed(20), Duration::ZERO);
    }
}
