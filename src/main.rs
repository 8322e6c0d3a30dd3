//! Family Tree - Entry Point
//!
//! Reads the demographic tables, generates the tree and then answers queries
//! from an interactive menu until the user quits or input ends.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use family_tree::core::config::{DataFiles, GeneratorConfig};
use family_tree::core::error::Result;
use family_tree::demographics::DemographicData;
use family_tree::menu::run_menu;
use family_tree::tree::TreeGenerator;

/// Generate a synthetic family tree and query it
#[derive(Parser, Debug)]
#[command(name = "family-tree")]
#[command(about = "Generate a synthetic multi-generational family tree from demographic tables")]
struct Args {
    /// Directory holding the demographic CSV files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the generation rules
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the generated tree as JSON to this file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("family_tree=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Using seed {}", seed);

    println!("Reading files...");
    let data = DemographicData::load(&args.data_dir, &DataFiles::default())?;

    println!("Generating family tree...");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let tree = TreeGenerator::new(&data, &config)?.generate(&mut rng)?;

    if let Some(path) = &args.export {
        let snapshot = tree.snapshot(Some(seed));
        snapshot.write_json(path)?;
        tracing::info!("Wrote {} to {}", snapshot.summary(), path.display());
    }

    let stdin = io::stdin();
    run_menu(&tree, stdin.lock(), io::stdout())?;
    Ok(())
}
