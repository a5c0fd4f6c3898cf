//! vbind replay CLI
//!
//! Command-line front end for the vbind-reconciler library. It replays
//! binding scripts (TOML files listing a directive and the values it receives
//! tick by tick) against in-memory elements and reports every element write
//! the reconciler performed.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

mod config;
mod replay;
mod report;

/// vbind - Replay v-bind updates and show the resulting element writes
#[derive(Parser, Debug)]
#[command(name = "vbind-cli")]
#[command(about = "Replay v-bind binding scripts against in-memory elements", long_about = None)]
#[command(version)]
struct Args {
    /// Script file(s) to replay
    #[arg(value_name = "SCRIPT", required = true)]
    scripts: Vec<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of scripts replayed in parallel (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("vbind CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using reconciler library v{}", vbind_reconciler::VERSION);

    let pool = {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = args.jobs {
            builder = builder.num_threads(jobs);
        }
        builder.build().context("Failed to start replay thread pool")?
    };

    // Scripts are independent: each binding gets its own reconciler and element
    let results: Vec<Result<replay::ScriptReport>> = pool.install(|| {
        args.scripts
            .par_iter()
            .map(|path| replay::replay_file(path))
            .collect()
    });

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failures += 1;
                log::error!("{:#}", e);
            }
        }
    }

    let rendered = match args.format {
        OutputFormat::Text => report::render_text(&reports),
        OutputFormat::Json => report::render_json(&reports)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    if failures > 0 {
        bail!("{} of {} script(s) failed", failures, args.scripts.len());
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["vbind-cli", "a.toml", "b.toml", "--format", "json", "-j", "2", "-vv"]);
        assert_eq!(args.scripts.len(), 2);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.jobs, Some(2));
        assert_eq!(args.verbose, 2);
        assert!(!args.quiet);
    }
}
