//! Command-line interface definitions for fastexp-plot.

use std::path::PathBuf;

use clap::Parser;

/// Render fastexp benchmark results as bar chart grids, one image per
/// precision class.
#[derive(Parser, Debug)]
#[command(name = "fastexp-plot", version, about)]
pub struct Cli {
    /// Configuration file (default: `fastexp-plot.toml` if present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory holding one sub-directory of result files per class.
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Directory to write the chart images to.
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Only process the named precision class.
    #[arg(long)]
    pub class: Option<String>,

    /// Abort a class on the first malformed result file.
    #[arg(long)]
    pub strict: bool,

    /// Print a table of the loaded results for each class.
    #[arg(long)]
    pub summary: bool,

    /// Only report warnings and errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report every loaded file and stage timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
