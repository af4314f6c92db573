//! Result file identity and grouped measurements.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PlotError;

/// Separator between implementation and version in a result file name.
pub const NAME_SEPARATOR: &str = "__";

/// One of the three fixed measurement groups of a result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// IEEE-compliant fast exponential variants.
    Ieee,
    /// Product-formula fast exponential variants.
    Product,
    /// Standard library `exp`, the baseline.
    Standard,
}

impl Category {
    /// All categories in band order.
    pub const ALL: [Self; 3] = [Self::Ieee, Self::Product, Self::Standard];

    /// Label used for this category in result files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ieee => "IEEE",
            Self::Product => "Product",
            Self::Standard => "Standard",
        }
    }

    /// Parses a result file label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Horizontal band this category occupies within a panel.
    pub fn band_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single row of a result file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Category the row belongs to.
    pub category: Category,
    /// Variant parameter (bit width, polynomial degree, ...).
    pub parameter: f64,
    /// Mean timing.
    pub mean: f64,
    /// Standard deviation of the timing.
    pub error: f64,
}

/// Identity of one result file: which implementation and version produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFile {
    /// Compiler or implementation name (before `__`).
    pub implementation: String,
    /// Version string (after `__`), including the file extension.
    pub version: String,
    /// Path the file was loaded from.
    pub path: PathBuf,
}

impl ResultFile {
    /// Derives the file identity from its name, `<implementation>__<version>.dat`.
    pub fn from_path(path: &Path) -> Result<Self, PlotError> {
        let malformed = || PlotError::MalformedFilename {
            path: path.to_path_buf(),
        };

        let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(malformed)?;
        let (implementation, version) = name.split_once(NAME_SEPARATOR).ok_or_else(malformed)?;
        if implementation.is_empty() || version.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            implementation: implementation.to_string(),
            version: version.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Version with its file extension removed.
    pub fn display_version(&self) -> &str {
        match self.version.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.version,
        }
    }

    /// Panel title, e.g. `gcc (v9)`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.implementation, self.display_version())
    }
}

/// Measurements of one result file partitioned by category.
///
/// Rows keep their file order within each category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedResults {
    groups: [Vec<Measurement>; 3],
}

impl GroupedResults {
    /// Creates an empty set of groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a measurement to its category.
    pub fn push(&mut self, measurement: Measurement) {
        self.groups[measurement.category.band_index()].push(measurement);
    }

    /// Measurements of a category in file order.
    pub fn get(&self, category: Category) -> &[Measurement] {
        &self.groups[category.band_index()]
    }

    /// The baseline row, if there is exactly one.
    pub fn baseline(&self) -> Option<&Measurement> {
        match self.get(Category::Standard) {
            [single] => Some(single),
            _ => None,
        }
    }

    /// Total number of rows across all categories.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no rows were grouped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A successfully loaded result file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    /// File identity.
    pub file: ResultFile,
    /// Grouped rows.
    pub results: GroupedResults,
}

impl LoadedFile {
    /// Mean timing of the baseline row.
    ///
    /// Loading guarantees the baseline exists.
    pub fn baseline_mean(&self) -> f64 {
        self.results.baseline().map_or(f64::NAN, |m| m.mean)
    }
}
