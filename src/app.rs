// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::models::RuntimeConfig;
use self::scanner::Scanner;

/// Parses the command line, resolves configuration and runs the sweep.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Configuration
    let config = resolve_config(args)?;

    run_with(config)
}

/// Runs the three phases in order for an already resolved configuration.
pub fn run_with(config: RuntimeConfig) -> Result<()> {
    // 3. Locate the raw folder. A missing folder is reported but still exits cleanly.
    let raw_dir = config.raw_dir();
    if !raw_dir.is_dir() {
        log::error!("Raw directory not found at {}", raw_dir.display());
        return Ok(());
    }
    let raw_dir = raw_dir
        .canonicalize()
        .context(format!("Failed to resolve {}", raw_dir.display()))?;

    println!("{}", OutputGenerator::generate_header(&config, &raw_dir));

    // 4. Scan Directory
    let scanner = Scanner::new(raw_dir, &config)?;
    let result = scanner.scan();

    // 5. Report
    println!(
        "{}",
        OutputGenerator::generate_invalid_section(&result.invalid_files)
    );
    let hidden = OutputGenerator::generate_hidden_section(&result.hidden_files);
    if !hidden.is_empty() {
        println!("{}", hidden);
    }
    println!("{}", OutputGenerator::generate_empty_section(&result.empty_dirs));

    // 6. Remove (or list) empty directories
    let removed = if result.empty_dirs.is_empty() {
        0
    } else {
        scanner.remove_empty(&result.empty_dirs)
    };

    println!(
        "{}",
        OutputGenerator::generate_summary(&result, removed, config.dry_run)
    );

    Ok(())
}
