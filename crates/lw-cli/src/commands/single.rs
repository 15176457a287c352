use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lw_core::OreTable;
use lw_simulation::simulate;

use super::TechniqueArgs;

pub fn run(
    world_path: &Path,
    technique: &str,
    y: i32,
    json: bool,
    params: &TechniqueArgs,
    ores: &OreTable,
) -> Result<(), String> {
    let technique = params.build(technique).at_level(y);
    technique.validate().map_err(|e| e.to_string())?;
    let world = super::load_world(world_path)?;
    let name = super::display_name(&world, world_path);

    let result = simulate(&world, &technique, ores).map_err(|e| format!("simulation failed: {e}"))?;

    if json {
        let value = serde_json::json!({
            "world": name,
            "technique": technique.name(),
            "y": y,
            "result": result,
        });
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| format!("cannot encode result: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    let start = technique.start();
    println!(
        "  {} '{}' {}",
        "Simulation".bold(),
        name,
        format!("({} from {start})", technique.name()).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Count"]);
    table.add_row(vec!["Blocks mined".to_string(), result.mined.to_string()]);
    table.add_row(vec!["Blocks exposed".to_string(), result.exposed.to_string()]);
    table.add_row(vec!["Lava".to_string(), result.lava.to_string()]);
    for (family, count) in result.ores.iter() {
        table.add_row(vec![family.to_string(), count.to_string()]);
    }
    println!("{table}");

    let total = result.ores.total();
    if total == 0 {
        println!("  {}", "No ore found.".dimmed());
    } else if result.mined > 0 {
        let per_hundred = total as f64 * 100.0 / result.mined as f64;
        println!(
            "  {} ore blocks, {} per 100 mined",
            total.to_string().green().bold(),
            format!("{per_hundred:.2}").green()
        );
    }
    Ok(())
}
