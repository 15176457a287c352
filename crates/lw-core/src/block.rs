use std::fmt;
use std::hash::{Hash, Hasher};

use crate::coords::BlockPos;

/// Block identifiers counted as exposed lava.
pub const LAVA_IDS: [&str; 2] = ["lava", "flowing_lava"];

/// Block identifier counted as air by the chunk census.
pub const AIR_ID: &str = "air";

/// Whether `id` is one of the lava identifiers.
pub fn is_lava(id: &str) -> bool {
    LAVA_IDS.contains(&id)
}

/// A block observed in a world: its position and its type identifier.
///
/// The identifier borrows from the world it was read from. Equality and
/// hashing look at the position only, so two observations of the same
/// coordinate are the same block for every set or dedup operation.
#[derive(Debug, Clone, Copy)]
pub struct Block<'w> {
    /// Where the block is.
    pub pos: BlockPos,
    /// The block type, e.g. `deepslate_iron_ore`.
    pub id: &'w str,
}

impl<'w> Block<'w> {
    /// Pair a position with its type identifier.
    pub const fn new(pos: BlockPos, id: &'w str) -> Self {
        Self { pos, id }
    }

    /// Whether this block is lava.
    pub fn is_lava(&self) -> bool {
        is_lava(self.id)
    }
}

impl PartialEq for Block<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Block<'_> {}

impl Hash for Block<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.id, self.pos)
    }
}
