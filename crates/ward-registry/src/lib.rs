//! The Ward lease registry: reference-counted, time-bounded protection of
//! spatial cells against mutation.
//!
//! A caller acquires a [`Lease`] over a set of cells with a TTL; a cell is
//! protected while at least one live, unexpired lease covers it. The host's
//! mutation hooks ask [`GuardRegistry::is_protected`] before letting a
//! mutation through and veto it if the answer is `true`.
//!
//! The registry owns all synchronization: one mutex guards the whole
//! cell-to-bindings table, so the protection state is never observed
//! mid-update. Expired bindings are reclaimed lazily, as a side effect of
//! queries — there is no background sweeper thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod lease;
pub mod registry;

pub use lease::Lease;
pub use registry::GuardRegistry;
