pub mod chunks;
pub mod full;
pub mod single;
pub mod sweep;

use std::borrow::Cow;
use std::path::Path;

use clap::Args;
use lw_core::{BlockPos, ChunkedWorld, Direction, OreTable, WorldError};
use lw_simulation::{Technique, TechniqueKind};

/// Overrides for the default technique parameters.
#[derive(Args, Debug, Default, Clone)]
pub struct TechniqueArgs {
    /// Number of branch pairs
    #[arg(long)]
    pub pairs: Option<u32>,

    /// Branch length (basic only)
    #[arg(long)]
    pub length: Option<u32>,

    /// Corridor distance between branch pairs
    #[arg(long)]
    pub branch_spacing: Option<u32>,

    /// Poke segments per branch (poke holes only)
    #[arg(long)]
    pub pokes: Option<u32>,

    /// Length of each poke segment (poke holes only)
    #[arg(long)]
    pub poke_spacing: Option<u32>,

    /// Corridor direction: north, south, east or west
    #[arg(long)]
    pub direction: Option<Direction>,

    /// Corridor start x
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    /// Corridor start z
    #[arg(long, allow_negative_numbers = true)]
    pub z: Option<i32>,
}

impl TechniqueArgs {
    /// The technique named `name` with these overrides applied.
    pub fn build(&self, name: &str) -> Technique {
        let technique = Technique::from(TechniqueKind::from_name(name));
        let start = |default: BlockPos| {
            BlockPos::new(
                self.x.unwrap_or(default.x),
                default.y,
                self.z.unwrap_or(default.z),
            )
        };
        match technique {
            Technique::Basic(mut config) => {
                if self.pokes.is_some() || self.poke_spacing.is_some() {
                    tracing::warn!("poke options have no effect on basic branch mining");
                }
                config.start = start(config.start);
                config.base_direction = self.direction.unwrap_or(config.base_direction);
                config.branch_pairs = self.pairs.unwrap_or(config.branch_pairs);
                config.branch_length = self.length.unwrap_or(config.branch_length);
                config.branch_spacing = self.branch_spacing.unwrap_or(config.branch_spacing);
                Technique::Basic(config)
            }
            Technique::PokeHoles(mut config) => {
                if self.length.is_some() {
                    tracing::warn!("--length has no effect with poke holes");
                }
                config.start = start(config.start);
                config.base_direction = self.direction.unwrap_or(config.base_direction);
                config.branch_pairs = self.pairs.unwrap_or(config.branch_pairs);
                config.pokes_per_branch = self.pokes.unwrap_or(config.pokes_per_branch);
                config.poke_spacing = self.poke_spacing.unwrap_or(config.poke_spacing);
                config.branch_spacing = self.branch_spacing.unwrap_or(config.branch_spacing);
                Technique::PokeHoles(config)
            }
        }
    }
}

/// Load a world snapshot, with the path in any error.
pub fn load_world(path: &Path) -> Result<ChunkedWorld, String> {
    let world = ChunkedWorld::load(path).map_err(|e| e.to_string())?;
    tracing::debug!(
        path = %path.display(),
        chunks = world.chunk_count(),
        blocks = world.stored_blocks(),
        "world loaded"
    );
    Ok(world)
}

/// The ore table from `path`, or the built-in one.
pub fn load_ores(path: Option<&Path>) -> Result<Cow<'static, OreTable>, String> {
    match path {
        Some(path) => OreTable::load(path).map(Cow::Owned).map_err(|e| match e {
            WorldError::OreTable { .. } => format!("{}: {e}", path.display()),
            other => other.to_string(),
        }),
        None => Ok(Cow::Borrowed(OreTable::standard())),
    }
}

/// File stem used to name output files.
pub fn world_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "world".to_string())
}

/// Display name: the snapshot's own name, else the file stem.
pub fn display_name(world: &ChunkedWorld, path: &Path) -> String {
    world
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| world_stem(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_to_the_selected_technique() {
        let args = TechniqueArgs {
            pairs: Some(2),
            length: Some(7),
            direction: Some(Direction::West),
            x: Some(-4),
            ..TechniqueArgs::default()
        };
        match args.build("basic") {
            Technique::Basic(config) => {
                assert_eq!(config.branch_pairs, 2);
                assert_eq!(config.branch_length, 7);
                assert_eq!(config.branch_spacing, 5);
                assert_eq!(config.base_direction, Direction::West);
                assert_eq!(config.start, BlockPos::new(-4, 0, 255));
            }
            other => panic!("expected basic, got {other:?}"),
        }
        match args.build("poke") {
            Technique::PokeHoles(config) => {
                assert_eq!(config.branch_pairs, 2);
                assert_eq!(config.pokes_per_branch, 25);
            }
            other => panic!("expected poke holes, got {other:?}"),
        }
    }

    #[test]
    fn stem_names_outputs() {
        assert_eq!(world_stem(Path::new("regions/r.0.0.json")), "r.0.0");
        assert_eq!(world_stem(Path::new("")), "world");
    }
}
