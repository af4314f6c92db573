//! fastexp benchmark plotter.
//!
//! Reads the result files the fastexp benchmark harness writes per
//! precision class and renders each class as one grid of bar charts.
//!
//! Pipeline per class: discover → load → compute scale → compose panels →
//! arrange grid → render. Classes are independent: one failing or being
//! empty never stops the others.

mod cli;
mod config;
mod log;

use anyhow::{Result, bail};
use clap::Parser;
use fastexp_perf::{ClassOutcome, PlotError, PrecisionClass, output, pipeline};
use tracing::error;

use crate::config::Settings;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    log::init(cli.quiet, cli.verbose);

    let config = config::load(cli.config.as_deref())?;
    let settings = config::resolve(config, &cli)?;

    let mut failed = 0;
    for class in &settings.classes {
        let _t = log::Timer::start(format!("{} precision", class.name));
        match run_class(class, &settings) {
            Ok(outcome) => println!("{}", output::format_outcome(&class.name, &outcome)),
            Err(e) => {
                error!("{} precision failed: {e}", class.name);
                println!("{}: failed", class.name);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} precision class(es) failed");
    }
    Ok(())
}

/// Runs the pipeline for one class, printing its summary table if requested.
fn run_class(class: &PrecisionClass, settings: &Settings) -> Result<ClassOutcome, PlotError> {
    if !settings.summary {
        return pipeline::run(class, &settings.style, settings.strict);
    }

    match pipeline::prepare(class, &settings.style, settings.strict) {
        Ok(prepared) => {
            output::print_summary(&prepared);
            prepared.render(&settings.style).map(ClassOutcome::Rendered)
        }
        Err(e @ PlotError::EmptyDataset { .. }) => Ok(ClassOutcome::Skipped(e)),
        Err(e) => Err(e),
    }
}
