//! Core types for the Ward protection registry.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifier newtypes ([`WorldId`], [`LeaseId`]), the [`CellId`] value type
//! that keys every registry lookup, the [`Clock`] abstraction used for lease
//! expiry, and the [`LeaseError`] error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod clock;
pub mod error;
pub mod id;

pub use cell::CellId;
pub use clock::{Clock, SystemClock};
pub use error::LeaseError;
pub use id::{LeaseId, WorldId};
