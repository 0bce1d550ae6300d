//! The [`CellId`] value type keying every registry lookup.

use std::fmt;

use crate::id::WorldId;

/// Identifies one protected spatial unit: a world plus integer coordinates.
///
/// Immutable and equality/hash based — two `CellId`s are equal iff all four
/// fields are equal. Projecting a host block to a `CellId` is a pure value
/// construction with no failure modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellId {
    /// The world this cell belongs to.
    pub world: WorldId,
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl CellId {
    /// Construct a cell identity from a world and coordinates.
    pub const fn new(world: WorldId, x: i32, y: i32, z: i32) -> Self {
        Self { world, x, y, z }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:({},{},{})", self.world, self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_over_all_fields() {
        let w = WorldId::new(42);
        let a = CellId::new(w, 1, 2, 3);
        assert_eq!(a, CellId::new(w, 1, 2, 3));
        assert_ne!(a, CellId::new(w, 1, 2, 4));
        assert_ne!(a, CellId::new(WorldId::new(43), 1, 2, 3));
    }

    #[test]
    fn test_usable_as_map_key() {
        let w = WorldId::new(7);
        let mut m = HashMap::new();
        m.insert(CellId::new(w, 0, 64, 0), "spawn");
        assert_eq!(m.get(&CellId::new(w, 0, 64, 0)), Some(&"spawn"));
        assert_eq!(m.get(&CellId::new(w, 0, 65, 0)), None);
    }
}
