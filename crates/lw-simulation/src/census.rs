use lw_core::block::{AIR_ID, is_lava};
use lw_core::coords::CHUNK_SIZE;
use lw_core::{BlockSource, ChunkPos, ChunkedWorld, OreTable};

use crate::aggregate::OreCounts;
use crate::error::SimResult;
use crate::sweep::LevelRange;

/// Raw block counts for one 16x16 layer of one chunk column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRow {
    /// The chunk column.
    pub chunk: ChunkPos,
    /// The layer height.
    pub y: i32,
    /// Air blocks in the layer.
    pub air: u64,
    /// Lava blocks in the layer.
    pub lava: u64,
    /// Ore blocks per family, no vein merging.
    pub ores: OreCounts,
}

/// Receives census rows in census order.
pub trait CensusSink {
    /// Persist one row.
    fn record(&mut self, row: &ChunkRow) -> SimResult<()>;
}

impl CensusSink for Vec<ChunkRow> {
    fn record(&mut self, row: &ChunkRow) -> SimResult<()> {
        self.push(row.clone());
        Ok(())
    }
}

/// Count one layer of one chunk.
pub fn count_layer<S: BlockSource + ?Sized>(
    world: &S,
    ores: &OreTable,
    chunk: ChunkPos,
    y: i32,
) -> ChunkRow {
    let mut row = ChunkRow {
        chunk,
        y,
        air: 0,
        lava: 0,
        ores: OreCounts::default(),
    };
    for lx in 0..CHUNK_SIZE as u8 {
        for lz in 0..CHUNK_SIZE as u8 {
            let id = world.block_at(chunk.block(lx, y, lz));
            if id == AIR_ID {
                row.air += 1;
            } else if is_lava(id) {
                row.lava += 1;
            } else if let Some(family) = ores.family_of(id) {
                row.ores.increment(family);
            }
        }
    }
    row
}

/// Count every stored chunk column of `world` at every level of `levels`.
///
/// Chunks are visited in sorted order and, inside each chunk, levels from the
/// top down. Returns the number of rows recorded.
pub fn chunk_census<K: CensusSink + ?Sized>(
    world: &ChunkedWorld,
    levels: LevelRange,
    ores: &OreTable,
    sink: &mut K,
) -> SimResult<usize> {
    let mut recorded = 0;
    for chunk in world.chunk_positions() {
        for y in levels.levels() {
            sink.record(&count_layer(world, ores, chunk, y))?;
            recorded += 1;
        }
        tracing::debug!(%chunk, "chunk counted");
    }
    Ok(recorded)
}
