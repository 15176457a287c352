//! CLI frontend for the Lodewalk strip-mining simulator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use lw_simulation::LevelRange;
use lw_simulation::sweep::{DEFAULT_BOTTOM, DEFAULT_TOP};
use tracing_subscriber::EnvFilter;

use commands::TechniqueArgs;

#[derive(Parser)]
#[command(
    name = "lw",
    about = "Lodewalk: estimate the ore yield of strip-mining techniques",
    version,
    propagate_version = true
)]
struct Cli {
    /// Ore table file of `block_id:family` lines, replacing the built-in table
    #[arg(long, global = true)]
    ore_table: Option<PathBuf>,

    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one technique at one level and print the result
    Single {
        /// World snapshot file (JSON)
        world: PathBuf,

        /// Technique: `basic` for plain branch mining, anything else for poke holes
        technique: String,

        /// Level of the player's feet
        #[arg(allow_negative_numbers = true)]
        y: i32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        params: TechniqueArgs,
    },

    /// Simulate one technique at every level of a range and write a CSV
    Sweep {
        /// World snapshot file (JSON)
        world: PathBuf,

        /// Technique: `basic` for plain branch mining, anything else for poke holes
        technique: String,

        /// Highest level (inclusive)
        #[arg(long, default_value_t = DEFAULT_TOP, allow_negative_numbers = true)]
        top: i32,

        /// Lowest level (inclusive)
        #[arg(long, default_value_t = DEFAULT_BOTTOM, allow_negative_numbers = true)]
        bottom: i32,

        /// Output directory
        #[arg(short, long, default_value = "results")]
        out: PathBuf,

        #[command(flatten)]
        params: TechniqueArgs,
    },

    /// Count air, lava and ore per layer of every stored chunk
    Chunks {
        /// World snapshot file (JSON)
        world: PathBuf,

        /// Highest level (inclusive)
        #[arg(long, default_value_t = DEFAULT_TOP, allow_negative_numbers = true)]
        top: i32,

        /// Lowest level (inclusive)
        #[arg(long, default_value_t = DEFAULT_BOTTOM, allow_negative_numbers = true)]
        bottom: i32,

        /// Output directory
        #[arg(short, long, default_value = "chunk_data")]
        out: PathBuf,
    },

    /// Sweep both techniques over every world file in a directory, in parallel
    Full {
        /// Directory of world snapshot files
        #[arg(short, long, default_value = "regions")]
        dir: PathBuf,

        /// Worker threads (0 = one per CPU)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        /// Highest level (inclusive)
        #[arg(long, default_value_t = DEFAULT_TOP, allow_negative_numbers = true)]
        top: i32,

        /// Lowest level (inclusive)
        #[arg(long, default_value_t = DEFAULT_BOTTOM, allow_negative_numbers = true)]
        bottom: i32,

        /// Output directory
        #[arg(short, long, default_value = "results")]
        out: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "lw=debug,lw_simulation=debug"
    } else {
        "lw=info,lw_simulation=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::load_ores(cli.ore_table.as_deref()).and_then(|ores| match cli.command {
        Commands::Single {
            world,
            technique,
            y,
            json,
            params,
        } => commands::single::run(&world, &technique, y, json, &params, &ores),
        Commands::Sweep {
            world,
            technique,
            top,
            bottom,
            out,
            params,
        } => commands::sweep::run(
            &world,
            &technique,
            LevelRange::new(top, bottom),
            &out,
            &params,
            &ores,
        ),
        Commands::Chunks {
            world,
            top,
            bottom,
            out,
        } => commands::chunks::run(&world, LevelRange::new(top, bottom), &out, &ores),
        Commands::Full {
            dir,
            threads,
            top,
            bottom,
            out,
        } => commands::full::run(&dir, threads, LevelRange::new(top, bottom), &out, &ores),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
