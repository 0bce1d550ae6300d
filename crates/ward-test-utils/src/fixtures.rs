//! Fixtures for constructing cells in a fixed test world.

use ward_core::{CellId, WorldId};

/// The world every fixture cell lives in.
pub const TEST_WORLD: WorldId = WorldId::new(0x7e57_0000_0000_0000_0000_0000_0000_0001);

/// A cell at `(x, y, z)` in [`TEST_WORLD`].
pub fn cell(x: i32, y: i32, z: i32) -> CellId {
    CellId::new(TEST_WORLD, x, y, z)
}
