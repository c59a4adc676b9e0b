//! Command line entry point: run a boot code program, then repair its infinite loop.

mod report;
mod telemetry;

use anyhow::{Context, Result};
use bootcode_core::{BootConfig, BoundsPolicy};
use bootcode_ir::{validate_program, Program};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "bootcode",
    version,
    about = "Detect and repair the infinite loop in a boot code program"
)]
struct Cli {
    /// Program file, one `<opcode> <argument>` per line
    input: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only a jump landing exactly one past the end halts
    #[arg(long)]
    strict: bool,

    /// Print a JSON report instead of two accumulator lines
    #[arg(long)]
    json: bool,

    /// Log each repair candidate
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<BootConfig> {
    let mut config = match &cli.config {
        Some(path) => BootConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BootConfig::default(),
    };

    if cli.strict {
        config.machine.bounds = BoundsPolicy::Strict;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,bootcode_vm=debug"
    } else {
        "warn"
    };
    telemetry::init_telemetry(default_filter)?;

    let result = run(&cli);

    telemetry::shutdown_telemetry();
    result
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let program = Program::parse(&source)
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;

    info!("Loaded {} instructions from {}", program.len(), cli.input.display());

    if let Err(e) = validate_program(&program, config.machine.bounds) {
        warn!("{}", e);
    }

    let (report, outcome) = report::analyze(program, &config);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.first_run.accumulator);
        if let Some(repair) = &report.repair {
            println!("{}", repair.accumulator);
        }
    }

    outcome.context("Could not fix infinite loop")?;
    Ok(())
}
