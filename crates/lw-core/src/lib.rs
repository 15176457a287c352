//! Core types for Lodewalk: coordinates, directions, blocks, ore families, and
//! the chunked world store.
//!
//! This crate knows nothing about mining techniques. It answers one question
//! for the simulation crate: "what block is at this position?" via the
//! [`BlockSource`] trait, and classifies block identifiers into ore families
//! via the [`OreTable`].

/// Blocks as seen by the simulation: a position and a borrowed type identifier.
pub mod block;
/// Absolute block positions, chunk positions, and neighborhood offsets.
pub mod coords;
/// The four cardinal directions and their displacement rules.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// Ore families and the block-id to family table.
pub mod ore;
/// The world lookup trait and the chunk-granular world store.
pub mod world;

/// Re-export block types.
pub use block::Block;
/// Re-export coordinate types.
pub use coords::{BlockPos, ChunkPos};
/// Re-export direction types.
pub use direction::Direction;
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export ore types.
pub use ore::{OreFamily, OreTable};
/// Re-export world types.
pub use world::{BlockSource, ChunkedWorld, WorldSnapshot};
