//! Test utilities for Ward development.
//!
//! Provides a manually-advanced [`ManualClock`] implementing the
//! [`Clock`](ward_core::Clock) trait, plus small fixtures for constructing
//! cells in a fixed test world.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod clock;
pub mod fixtures;

pub use clock::ManualClock;
pub use fixtures::{cell, TEST_WORLD};
