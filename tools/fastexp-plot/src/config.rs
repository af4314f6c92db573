//! Configuration for fastexp-plot.
//!
//! Deserialized from `fastexp-plot.toml` in the working directory (or the
//! file given with `--config`). Every key is optional; the defaults
//! reproduce the benchmark harness layout:
//!
//! ```toml
//! strict = false
//!
//! [[class]]
//! name = "single"
//! input = "../results/float"
//! output = "plots/single_precision.png"
//!
//! [[class]]
//! name = "double"
//! input = "../results/double"
//! output = "plots/double_precision.png"
//!
//! [style]
//! cell_size = 400
//! palette = ["#6d0410", "#b5636d", "#757575"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fastexp_perf::{PlotStyle, PrecisionClass};
use serde::Deserialize;

use crate::cli::Cli;

/// Configuration file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fastexp-plot.toml";

/// Top-level configuration file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Abort a class on the first malformed file.
    #[serde(default)]
    pub strict: bool,
    /// `[[class]]` entries; empty means the default single/double pair.
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassConfig>,
    /// `[style]` table.
    #[serde(default)]
    pub style: PlotStyle,
}

/// A `[[class]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassConfig {
    /// Class name used in diagnostics and `--class`.
    pub name: String,
    /// Directory of `*.dat` result files.
    pub input: PathBuf,
    /// Output image path.
    pub output: PathBuf,
}

impl ClassConfig {
    fn new(name: &str, input: &str, output: &str) -> Self {
        Self {
            name: name.to_string(),
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }
    }
}

/// The single and double precision classes of the benchmark harness.
fn default_classes() -> Vec<ClassConfig> {
    vec![
        ClassConfig::new(
            "single",
            "../results/float",
            "plots/single_precision.png",
        ),
        ClassConfig::new(
            "double",
            "../results/double",
            "plots/double_precision.png",
        ),
    ]
}

/// Fully resolved settings for a run.
#[derive(Debug)]
pub struct Settings {
    /// Classes to process, in order.
    pub classes: Vec<PrecisionClass>,
    /// Chart styling.
    pub style: PlotStyle,
    /// Abort a class on the first malformed file.
    pub strict: bool,
    /// Print per-class result tables.
    pub summary: bool,
}

/// Parses configuration file contents.
pub fn parse(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    Ok(config)
}

/// Loads the configuration file.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !required && !path.exists() {
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Replaces the directory of `path`, keeping its final component.
fn rebase(path: &Path, dir: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    }
}

/// Combines the configuration file with command-line overrides.
pub fn resolve(config: Config, cli: &Cli) -> Result<Settings> {
    config
        .style
        .validate()
        .map_err(|msg| anyhow::anyhow!("invalid style: {msg}"))?;

    let mut classes = if config.classes.is_empty() {
        default_classes()
    } else {
        config.classes
    };

    for (i, class) in classes.iter().enumerate() {
        if classes[..i].iter().any(|c| c.name == class.name) {
            bail!("duplicate class '{}' in configuration", class.name);
        }
    }

    if let Some(ref only) = cli.class {
        classes.retain(|c| &c.name == only);
        if classes.is_empty() {
            bail!("unknown class '{only}'");
        }
    }

    let classes = classes
        .into_iter()
        .map(|c| PrecisionClass {
            input: match cli.results_dir {
                Some(ref dir) => rebase(&c.input, dir),
                None => c.input,
            },
            output: match cli.output_dir {
                Some(ref dir) => rebase(&c.output, dir),
                None => c.output,
            },
            name: c.name,
        })
        .collect();

    Ok(Settings {
        classes,
        style: config.style,
        strict: config.strict || cli.strict,
        summary: cli.summary,
    })
}
