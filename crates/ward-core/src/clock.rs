//! Time source abstraction for lease expiry.

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of the current time in milliseconds.
///
/// The registry reads time through this trait so that expiry behavior is
/// testable without sleeping. Production code uses [`SystemClock`]; tests
/// inject a manually-advanced clock.
pub trait Clock: Send + Sync {
    /// The current time in milliseconds.
    ///
    /// Must be monotonically non-decreasing across calls for expiry
    /// semantics to hold.
    fn now_millis(&self) -> u64;
}

/// Wall-clock time in milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}
