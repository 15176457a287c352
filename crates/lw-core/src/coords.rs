use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of a chunk column on the x and z axes.
pub const CHUNK_SIZE: i32 = 16;

/// An absolute block position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct BlockPos {
    /// East-west axis; east is positive.
    pub x: i32,
    /// Vertical axis; up is positive.
    pub y: i32,
    /// North-south axis; south is positive.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return this position shifted by the given deltas.
    ///
    /// Callers keep the result inside the `i32` range; see
    /// [`BlockPos::checked_offset`] near the edges.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Shift by the given deltas, or `None` if any axis leaves the `i32` range.
    pub const fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        match (
            self.x.checked_add(dx),
            self.y.checked_add(dy),
            self.z.checked_add(dz),
        ) {
            (Some(x), Some(y), Some(z)) => Some(Self { x, y, z }),
            _ => None,
        }
    }

    /// Return this position moved vertically by `dy`.
    pub const fn up(self, dy: i32) -> Self {
        self.offset(0, dy, 0)
    }

    /// Return the same position at a different height.
    pub const fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    /// The chunk column containing this position.
    pub const fn chunk(self) -> ChunkPos {
        ChunkPos {
            x: self.x.div_euclid(CHUNK_SIZE),
            z: self.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Position relative to the owning chunk's origin (x and z in `0..16`).
    pub const fn local(self) -> LocalPos {
        LocalPos {
            x: self.x.rem_euclid(CHUNK_SIZE) as u8,
            y: self.y,
            z: self.z.rem_euclid(CHUNK_SIZE) as u8,
        }
    }

    /// Iterate over the 26 positions surrounding this one. Neighbours past
    /// the edge of the coordinate range are skipped.
    pub fn neighbors(self) -> impl Iterator<Item = BlockPos> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy, dz)| self.checked_offset(dx, dy, dz))
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<BlockPos> for [i32; 3] {
    fn from(pos: BlockPos) -> Self {
        [pos.x, pos.y, pos.z]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Chunk column index on the xz plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    /// Chunk index along x.
    pub x: i32,
    /// Chunk index along z.
    pub z: i32,
}

impl ChunkPos {
    /// Create a chunk position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The absolute position of a block inside this chunk.
    pub const fn block(self, local_x: u8, y: i32, local_z: u8) -> BlockPos {
        BlockPos {
            x: self.x * CHUNK_SIZE + local_x as i32,
            y,
            z: self.z * CHUNK_SIZE + local_z as i32,
        }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// A position inside a chunk column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// Local x in `0..16`.
    pub x: u8,
    /// Absolute height.
    pub y: i32,
    /// Local z in `0..16`.
    pub z: u8,
}

/// Every `(dx, dy, dz)` in `{-1, 0, 1}^3` except the origin, x outermost.
pub const NEIGHBOR_OFFSETS: [(i32, i32, i32); 26] = neighbor_offsets();

const fn neighbor_offsets() -> [(i32, i32, i32); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    out
}
