//! Ward: temporary, reference-counted protection of spatial cells.
//!
//! This is the top-level facade crate re-exporting the public API from the
//! Ward sub-crates. For most users, adding `ward` as a single dependency is
//! sufficient.
//!
//! A caller acquires a [`Lease`](prelude::Lease) over a set of cells with a
//! time-to-live; while at least one live, unexpired lease covers a cell,
//! [`GuardRegistry::is_protected`](prelude::GuardRegistry::is_protected)
//! answers `true` and the host's mutation hooks veto the attempted change.
//! Typical use: shielding a region from breakage, explosions, physics, or
//! fluid flow while a scripted build or multi-block transaction runs.
//!
//! # Quick start
//!
//! ```rust
//! use ward::prelude::*;
//!
//! // One registry per process, cloned to whoever needs it.
//! let registry = GuardRegistry::new();
//!
//! let world = WorldId::new(0x4d61_696e);
//! let platform = [
//!     CellId::new(world, 10, 64, 10),
//!     CellId::new(world, 11, 64, 10),
//!     CellId::new(world, 12, 64, 10),
//! ];
//!
//! // Shield the platform for 30 seconds while the build runs.
//! let mut lease = registry.acquire(platform, 30_000);
//! assert!(registry.is_protected(&platform[0]));
//!
//! // A second lease on an overlapping cell: protection is the union.
//! let overlap = registry.acquire([platform[0]], 30_000);
//! lease.close();
//! assert!(registry.is_protected(&platform[0]));
//! assert!(!registry.is_protected(&platform[1]));
//! drop(overlap);
//! assert!(!registry.is_protected(&platform[0]));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ward-core` | `CellId`, `WorldId`, `LeaseId`, `Clock`, `LeaseError` |
//! | [`registry`] | `ward-registry` | `GuardRegistry` and the `Lease` handle |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifier, clock, and error types (`ward-core`).
pub use ward_core as types;

/// The lease registry and lease handle (`ward-registry`).
pub use ward_registry as registry;

/// Commonly used types, re-exported for glob import.
pub mod prelude {
    pub use ward_core::{CellId, Clock, LeaseError, LeaseId, SystemClock, WorldId};
    pub use ward_registry::{GuardRegistry, Lease};
}
