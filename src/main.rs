use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "kvgen",
    about = "Generate a CSV of random 128-bit key/value pairs",
    version
)]
struct Cli {
    /// Number of records to generate
    #[arg(default_value_t = kvgen::DEFAULT_COUNT)]
    count: u64,

    /// Output file; defaults to dataset{COUNT}.csv. A .gz or .zst extension
    /// compresses the output
    path: Option<PathBuf>,

    /// Seed the identifier generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let path = cli
        .path
        .unwrap_or_else(|| PathBuf::from(kvgen::default_filename(cli.count)));
    let options = kvgen::GenerateOptions {
        source: cli.seed.map_or(kvgen::Source::Os, kvgen::Source::Seeded),
    };

    let start = Instant::now();
    let written = kvgen::generate_with(cli.count, &path, &options)?;
    log::info!(
        "wrote {written} records to {} in {:.2}ms",
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
