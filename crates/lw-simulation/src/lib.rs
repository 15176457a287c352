//! Strip-mining simulation for Lodewalk.
//!
//! A run walks one mining technique through a [`lw_core::BlockSource`],
//! collecting every block the tunnels would expose, then grows each exposed
//! ore block into its vein and counts unique ore blocks per family.
//! Everything here is a pure read of an immutable world; the only outputs are
//! result records and the rows a [`RowSink`] chooses to persist.

/// Aggregation of exposed blocks into per-family ore counts.
pub mod aggregate;
/// Chunk census: raw per-layer block counts for each stored chunk.
pub mod census;
/// Technique parameters and technique selection.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// The primitive excavation cross-sections every technique is built from.
pub mod pattern;
/// CSV result sinks.
pub mod sink;
/// Single runs and vertical sweeps.
pub mod sweep;
/// Technique drivers: branch mining with and without poke holes.
pub mod technique;
/// Flood fill of connected ore blocks.
pub mod vein;

/// Re-exports of the chunk census.
pub use census::{CensusSink, ChunkRow, chunk_census};
/// Re-exports of the technique configuration types.
pub use config::{BranchMiningConfig, PokeHoleConfig, Technique, TechniqueKind};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`aggregate::OreCounts`] and [`aggregate::SimulationResult`].
pub use aggregate::{OreCounts, SimulationResult, aggregate};
/// Re-exports of the CSV sinks.
pub use sink::{ChunkCsvSink, CsvSink};
/// Re-exports of the run entry points.
pub use sweep::{LevelRange, RowSink, simulate, sweep};
/// Re-exports of the technique drivers.
pub use technique::{TechniqueOutcome, branch_with_poke_holes, standard_branch_mining};
/// Re-exports of the vein flood fill.
pub use vein::{ensure_bounded_veins, expand_vein};
