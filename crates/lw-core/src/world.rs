use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coords::{BlockPos, ChunkPos, LocalPos};
use crate::error::{WorldError, WorldResult};

/// Read-only block lookup over an immutable world snapshot.
///
/// Lookups are total: every coordinate has a block type.
pub trait BlockSource {
    /// The type identifier of the block at `pos`.
    fn block_at(&self, pos: BlockPos) -> &str;

    /// The type that every coordinate outside the stored region reads as,
    /// when there is one. Sources that store every block return `None`.
    fn background(&self) -> Option<&str> {
        None
    }
}

impl<T: BlockSource + ?Sized> BlockSource for &T {
    fn block_at(&self, pos: BlockPos) -> &str {
        (**self).block_at(pos)
    }

    fn background(&self) -> Option<&str> {
        (**self).background()
    }
}

/// Block type used for unset coordinates when a snapshot does not name one.
pub const DEFAULT_FILL: &str = "stone";

fn default_fill() -> String {
    DEFAULT_FILL.to_string()
}

/// On-disk JSON form of a world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type of every coordinate not set by a cuboid or block entry.
    #[serde(default = "default_fill")]
    pub fill: String,
    /// Box fills, applied in order before `blocks`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cuboids: Vec<CuboidEntry>,
    /// Single blocks, applied last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockEntry>,
}

impl Default for WorldSnapshot {
    fn default() -> Self {
        Self {
            name: None,
            fill: default_fill(),
            cuboids: Vec::new(),
            blocks: Vec::new(),
        }
    }
}

/// One block of a [`WorldSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    /// Absolute position.
    pub pos: BlockPos,
    /// Block type.
    pub id: String,
}

/// An inclusive box of identical blocks in a [`WorldSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuboidEntry {
    /// One corner.
    pub from: BlockPos,
    /// The opposite corner.
    pub to: BlockPos,
    /// Block type for every position in the box.
    pub id: String,
}

#[derive(Debug, Clone, Default)]
struct Chunk {
    blocks: HashMap<LocalPos, u32>,
}

/// A world stored as 16x16 chunk columns with a shared block-type palette.
///
/// Only explicitly set blocks are stored; every other coordinate reads as the
/// fill type.
#[derive(Debug, Clone)]
pub struct ChunkedWorld {
    name: Option<String>,
    palette: Vec<String>,
    palette_index: HashMap<String, u32>,
    chunks: HashMap<ChunkPos, Chunk>,
}

impl ChunkedWorld {
    /// An empty world where every coordinate reads as `fill`.
    pub fn new(fill: impl Into<String>) -> Self {
        let fill = fill.into();
        let mut palette_index = HashMap::new();
        palette_index.insert(fill.clone(), 0);
        Self {
            name: None,
            palette: vec![fill],
            palette_index,
            chunks: HashMap::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The type of unset coordinates.
    pub fn fill(&self) -> &str {
        &self.palette[0]
    }

    fn intern(&mut self, id: &str) -> u32 {
        if let Some(&index) = self.palette_index.get(id) {
            return index;
        }
        let index = self.palette.len() as u32;
        self.palette.push(id.to_string());
        self.palette_index.insert(id.to_string(), index);
        index
    }

    /// Set the block at `pos`.
    pub fn set(&mut self, pos: BlockPos, id: &str) {
        let index = self.intern(id);
        self.chunks
            .entry(pos.chunk())
            .or_default()
            .blocks
            .insert(pos.local(), index);
    }

    /// Set every block in the inclusive box spanned by two corners.
    pub fn fill_cuboid(&mut self, a: BlockPos, b: BlockPos, id: &str) {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    self.set(BlockPos::new(x, y, z), id);
                }
            }
        }
    }

    /// Chunk columns holding at least one explicitly set block, sorted.
    pub fn chunk_positions(&self) -> Vec<ChunkPos> {
        let mut positions: Vec<_> = self.chunks.keys().copied().collect();
        positions.sort();
        positions
    }

    /// Number of stored chunk columns.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of explicitly set blocks.
    pub fn stored_blocks(&self) -> usize {
        self.chunks.values().map(|c| c.blocks.len()).sum()
    }

    /// Build a world from its snapshot form.
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Self {
        let mut world = Self::new(snapshot.fill.as_str());
        world.name = snapshot.name.clone();
        for cuboid in &snapshot.cuboids {
            world.fill_cuboid(cuboid.from, cuboid.to, &cuboid.id);
        }
        for block in &snapshot.blocks {
            world.set(block.pos, &block.id);
        }
        world
    }

    /// Parse a snapshot from JSON text. `path` is only used for error messages.
    pub fn from_json(text: &str, path: &Path) -> WorldResult<Self> {
        let snapshot: WorldSnapshot =
            serde_json::from_str(text).map_err(|source| WorldError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_snapshot(&snapshot))
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> WorldResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }
}

impl BlockSource for ChunkedWorld {
    fn block_at(&self, pos: BlockPos) -> &str {
        let index = self
            .chunks
            .get(&pos.chunk())
            .and_then(|chunk| chunk.blocks.get(&pos.local()))
            .copied()
            .unwrap_or(0);
        &self.palette[index as usize]
    }

    fn background(&self) -> Option<&str> {
        Some(self.fill())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_blocks_read_as_fill() {
        let world = ChunkedWorld::new("deepslate");
        assert_eq!(world.block_at(BlockPos::new(0, 0, 0)), "deepslate");
        assert_eq!(world.block_at(BlockPos::new(-500, -59, 9000)), "deepslate");
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn background_is_the_fill() {
        let mut world = ChunkedWorld::new("tuff");
        world.set(BlockPos::new(3, 3, 3), "gold_ore");
        assert_eq!(world.background(), Some("tuff"));
        assert_eq!((&world).background(), Some("tuff"));
    }

    #[test]
    fn set_and_read_across_chunk_boundaries() {
        let mut world = ChunkedWorld::new("stone");
        let positions = [
            BlockPos::new(15, 10, 15),
            BlockPos::new(16, 10, 15),
            BlockPos::new(-1, 10, -1),
            BlockPos::new(-16, 10, 0),
        ];
        for pos in positions {
            world.set(pos, "iron_ore");
        }
        for pos in positions {
            assert_eq!(world.block_at(pos), "iron_ore");
        }
        assert_eq!(world.block_at(BlockPos::new(14, 10, 15)), "stone");
        assert_eq!(world.chunk_count(), 4);
        assert_eq!(
            world.chunk_positions(),
            vec![
                ChunkPos::new(-1, -1),
                ChunkPos::new(-1, 0),
                ChunkPos::new(0, 0),
                ChunkPos::new(1, 0),
            ]
        );
    }

    #[test]
    fn later_writes_win() {
        let mut world = ChunkedWorld::new("stone");
        let pos = BlockPos::new(3, 4, 5);
        world.set(pos, "coal_ore");
        world.set(pos, "air");
        assert_eq!(world.block_at(pos), "air");
        assert_eq!(world.stored_blocks(), 1);
    }

    #[test]
    fn cuboid_corners_in_any_order() {
        let mut world = ChunkedWorld::new("stone");
        world.fill_cuboid(BlockPos::new(2, 2, 2), BlockPos::new(0, 0, 0), "air");
        assert_eq!(world.stored_blocks(), 27);
        assert_eq!(world.block_at(BlockPos::new(1, 1, 1)), "air");
        assert_eq!(world.block_at(BlockPos::new(3, 1, 1)), "stone");
    }

    #[test]
    fn snapshot_applies_cuboids_then_blocks() {
        let json = r#"{
            "name": "Test",
            "fill": "deepslate",
            "cuboids": [{ "from": [0, 0, 0], "to": [2, 2, 2], "id": "air" }],
            "blocks": [{ "pos": [1, 1, 1], "id": "iron_ore" }]
        }"#;
        let world = ChunkedWorld::from_json(json, Path::new("test.json")).unwrap();
        assert_eq!(world.name(), Some("Test"));
        assert_eq!(world.fill(), "deepslate");
        assert_eq!(world.block_at(BlockPos::new(1, 1, 1)), "iron_ore");
        assert_eq!(world.block_at(BlockPos::new(0, 0, 0)), "air");
        assert_eq!(world.block_at(BlockPos::new(5, 5, 5)), "deepslate");
    }

    #[test]
    fn snapshot_defaults_to_stone_fill() {
        let world = ChunkedWorld::from_json("{}", Path::new("empty.json")).unwrap();
        assert_eq!(world.fill(), DEFAULT_FILL);
        assert!(world.name().is_none());
    }

    #[test]
    fn malformed_snapshot_names_the_file() {
        let err = ChunkedWorld::from_json("{ not json", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, WorldError::Malformed { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("world.json");
        std::fs::write(&path, r#"{"blocks": [{"pos": [0, 64, 0], "id": "lava"}]}"#).unwrap();
        let world = ChunkedWorld::load(&path).unwrap();
        assert_eq!(world.block_at(BlockPos::new(0, 64, 0)), "lava");

        let err = ChunkedWorld::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, WorldError::Io { .. }));
    }

    #[test]
    fn references_are_block_sources() {
        fn read(source: impl BlockSource) -> String {
            source.block_at(BlockPos::new(0, 0, 0)).to_string()
        }
        let world = ChunkedWorld::new("air");
        assert_eq!(read(&world), "air");
    }
}
