use std::path::{Path, PathBuf};

use colored::Colorize;

use lw_core::OreTable;
use lw_simulation::{CsvSink, LevelRange, Technique};

use super::TechniqueArgs;

/// `<out>/results-<stem>-<technique>.csv`
pub fn result_path(out: &Path, world_path: &Path, technique: &Technique) -> PathBuf {
    out.join(format!(
        "results-{}-{}.csv",
        super::world_stem(world_path),
        technique.name()
    ))
}

pub fn run(
    world_path: &Path,
    technique: &str,
    levels: LevelRange,
    out: &Path,
    params: &TechniqueArgs,
    ores: &OreTable,
) -> Result<(), String> {
    let technique = params.build(technique);
    technique.validate().map_err(|e| e.to_string())?;
    let world = super::load_world(world_path)?;

    let path = result_path(out, world_path, &technique);
    let mut sink = CsvSink::create(&path).map_err(|e| e.to_string())?;
    let rows = lw_simulation::sweep(&world, &technique, levels, ores, &mut sink)
        .map_err(|e| format!("sweep failed: {e}"))?;

    println!(
        "  {} {} levels of {} ({} to {}) -> {}",
        "Wrote".green().bold(),
        rows,
        technique.name(),
        levels.top(),
        levels.bottom(),
        path.display()
    );
    Ok(())
}
