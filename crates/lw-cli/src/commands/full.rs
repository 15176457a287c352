use std::path::{Path, PathBuf};

use colored::Colorize;
use rayon::prelude::*;

use lw_core::OreTable;
use lw_simulation::{CsvSink, LevelRange, Technique, TechniqueKind};

/// World files in `dir`, sorted by path.
fn world_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("cannot read {}: {e}", dir.display()))?;
    let mut files: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Sweep both techniques over one world. Returns the rows written.
fn sweep_file(path: &Path, levels: LevelRange, out: &Path, ores: &OreTable) -> Result<usize, String> {
    let world = super::load_world(path)?;
    let mut rows = 0;
    for kind in TechniqueKind::ALL {
        let technique = Technique::from(kind);
        let csv = super::sweep::result_path(out, path, &technique);
        let mut sink = CsvSink::create(&csv).map_err(|e| e.to_string())?;
        rows += lw_simulation::sweep(&world, &technique, levels, ores, &mut sink)
            .map_err(|e| e.to_string())?;
    }
    tracing::info!(world = %path.display(), rows, "world complete");
    Ok(rows)
}

pub fn run(
    dir: &Path,
    threads: usize,
    levels: LevelRange,
    out: &Path,
    ores: &OreTable,
) -> Result<(), String> {
    let files = world_files(dir)?;
    if files.is_empty() {
        println!("  No world files found in {}.", dir.display());
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| format!("cannot start worker pool: {e}"))?;
    println!(
        "  {} {} worlds on {} threads",
        "Simulating".bold(),
        files.len(),
        pool.current_num_threads()
    );

    let outcomes: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|path| (path, sweep_file(path, levels, out, ores)))
            .collect()
    });

    let mut failed = 0;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(rows) => println!("  {} {} ({rows} rows)", "ok".green().bold(), path.display()),
            Err(e) => {
                failed += 1;
                tracing::warn!(world = %path.display(), error = %e, "world skipped");
                println!("  {} {}: {e}", "FAILED".red().bold(), path.display());
            }
        }
    }

    if failed > 0 {
        Err(format!("{failed} of {} world files failed", outcomes.len()))
    } else {
        Ok(())
    }
}
