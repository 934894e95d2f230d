//! leibniz-pi - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use leibniz_pi::analysis::{error_bound, terms_for_tolerance};
use leibniz_pi::cli::{Args, Commands, Config};
use leibniz_pi::execution::{execute, is_broken_pipe, RunSettings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    if let Err(msg) = args.validate() {
        anyhow::bail!(msg);
    }

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match &args.command {
        Some(Commands::Config) => show_config(&args, &config)?,
        Some(Commands::Bound { tolerance }) => show_bound(*tolerance)?,
        None => run_estimate(&args, &config)?,
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leibniz_pi=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_estimate(args: &Args, config: &Config) -> Result<()> {
    let settings = RunSettings::resolve(args, config)?;
    tracing::debug!(
        iterations = settings.iterations.get(),
        verbosity = settings.verbosity.as_str(),
        format = settings.format.as_str(),
        color = settings.color,
        "resolved run settings"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match execute(&settings, &mut out) {
        Err(e) if is_broken_pipe(&e) => {
            tracing::debug!("stdout closed by reader, stopping");
            Ok(())
        }
        result => result.map(|_| ()).map_err(Into::into),
    }
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => match Config::default_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };

    println!("# leibniz-pi configuration ({})", source);
    print!("{}", config.to_toml()?);

    Ok(())
}

fn show_bound(tolerance: f64) -> Result<()> {
    let terms = terms_for_tolerance(tolerance)?;
    println!(
        "{} terms keep the error within {} (bound after {} terms: {})",
        terms,
        tolerance,
        terms,
        error_bound(terms as usize)
    );

    Ok(())
}
