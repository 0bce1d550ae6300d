//! Strongly-typed identifiers for worlds and leases.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque 128-bit identifier for a world (a distinct coordinate space).
///
/// Hosts that identify worlds by UUID can project the UUID's raw bytes
/// through [`WorldId::from_bytes`]; the registry never interprets the
/// value beyond equality and hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(u128);

impl WorldId {
    /// Construct from a raw 128-bit value.
    pub const fn new(v: u128) -> Self {
        Self(v)
    }

    /// Construct from 16 big-endian bytes (e.g. the raw bytes of a UUID).
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// The raw 128-bit value.
    pub const fn as_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl From<u128> for WorldId {
    fn from(v: u128) -> Self {
        Self(v)
    }
}

/// Counter for unique [`LeaseId`] allocation.
static LEASE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for a lease.
///
/// Allocated from a monotonic atomic counter via [`LeaseId::next`]. Two
/// distinct leases always have different IDs, which is what disambiguates
/// one lease's bindings from another's on the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeaseId(u64);

impl LeaseId {
    /// Allocate a fresh, unique lease ID.
    ///
    /// Each call returns an ID that has never been returned before within
    /// this process. Thread-safe.
    pub fn next() -> Self {
        Self(LEASE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LeaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
