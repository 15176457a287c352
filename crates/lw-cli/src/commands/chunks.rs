use std::path::Path;

use colored::Colorize;

use lw_core::OreTable;
use lw_simulation::{ChunkCsvSink, LevelRange, chunk_census};

pub fn run(world_path: &Path, levels: LevelRange, out: &Path, ores: &OreTable) -> Result<(), String> {
    let world = super::load_world(world_path)?;
    if world.chunk_count() == 0 {
        println!("  {}", "World has no stored chunks. Nothing to count.".dimmed());
        return Ok(());
    }

    let path = out.join(format!("{}_chunks.csv", super::world_stem(world_path)));
    let mut sink = ChunkCsvSink::create(&path).map_err(|e| e.to_string())?;
    let rows = chunk_census(&world, levels, ores, &mut sink)
        .map_err(|e| format!("chunk census failed: {e}"))?;

    println!(
        "  {} {} rows for {} chunks -> {}",
        "Wrote".green().bold(),
        rows,
        world.chunk_count(),
        path.display()
    );
    Ok(())
}
