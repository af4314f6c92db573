//! Result file discovery and parsing.
//!
//! A result file is plain text with one measurement per line:
//!
//! ```text
//! # label  parameter  mean   error
//! IEEE     0          12.4   0.3
//! IEEE     1          14.0   0.2
//! Product  8          9.7    0.1
//! Standard 0          61.0   1.5
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Rows of a category
//! must already be sorted by ascending parameter.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{PlotError, RowFault};
use crate::results::{Category, GroupedResults, LoadedFile, Measurement, ResultFile};

/// File extension of result files.
pub const RESULT_EXTENSION: &str = "dat";

/// Comment marker.
const COMMENT: char = '#';

/// All result files of one precision class.
#[derive(Debug)]
pub struct ClassData {
    /// Directory the files were discovered in.
    pub dir: PathBuf,
    /// Successfully loaded files, in discovery order.
    pub files: Vec<LoadedFile>,
    /// Files that failed to load, with the reason.
    pub excluded: Vec<PlotError>,
}

/// Lists the result files in `dir`, sorted by file name.
///
/// A directory that does not exist holds no results.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, PlotError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| PlotError::FileNotReadable {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;

        let is_result = entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == RESULT_EXTENSION);
        if is_result {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Parses the text of a result file into grouped measurements.
///
/// `path` is only used for diagnostics.
pub fn parse_results(path: &Path, text: &str) -> Result<GroupedResults, PlotError> {
    let mut grouped = GroupedResults::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
            continue;
        }

        let measurement = parse_row(trimmed).map_err(|fault| PlotError::MalformedRow {
            path: path.to_path_buf(),
            line: idx + 1,
            fault,
        })?;

        // Rows are expected pre-sorted per category; never re-sort here.
        if let Some(previous) = grouped.get(measurement.category).last() {
            if measurement.parameter < previous.parameter {
                return Err(PlotError::MalformedRow {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    fault: RowFault::OutOfOrder {
                        category: measurement.category,
                        previous: previous.parameter,
                        parameter: measurement.parameter,
                    },
                });
            }
        }

        grouped.push(measurement);
    }

    let found = grouped.get(Category::Standard).len();
    if found != 1 {
        return Err(PlotError::MissingCategory {
            path: path.to_path_buf(),
            category: Category::Standard,
            found,
        });
    }

    Ok(grouped)
}

/// Parses one non-empty, non-comment row.
fn parse_row(line: &str) -> Result<Measurement, RowFault> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[label, parameter, mean, error] = fields.as_slice() else {
        return Err(RowFault::FieldCount {
            found: fields.len(),
        });
    };

    let category = Category::from_label(label).ok_or_else(|| RowFault::UnknownLabel {
        label: label.to_string(),
    })?;

    Ok(Measurement {
        category,
        parameter: parse_number("parameter", parameter)?,
        mean: parse_number("mean", mean)?,
        error: parse_number("error", error)?,
    })
}

/// Parses a finite floating point field.
fn parse_number(field: &'static str, value: &str) -> Result<f64, RowFault> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowFault::NotNumeric {
            field,
            value: value.to_string(),
        })
}

/// Reads and parses a single result file.
pub fn load_file(path: &Path) -> Result<LoadedFile, PlotError> {
    let file = ResultFile::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| PlotError::FileNotReadable {
        path: path.to_path_buf(),
        source,
    })?;
    let results = parse_results(path, &text)?;

    debug!(
        path = %path.display(),
        rows = results.len(),
        "loaded result file"
    );

    Ok(LoadedFile { file, results })
}

/// Discovers and loads every result file in a precision class directory.
///
/// Files that fail to load are excluded and recorded in
/// [`ClassData::excluded`]; with `strict` set, the first failure is returned
/// instead. Returns [`PlotError::EmptyDataset`] if no files are found.
pub fn load_class(dir: &Path, strict: bool) -> Result<ClassData, PlotError> {
    let paths = discover(dir)?;
    if paths.is_empty() {
        return Err(PlotError::EmptyDataset {
            dir: dir.to_path_buf(),
        });
    }

    let mut files = Vec::with_capacity(paths.len());
    let mut excluded = Vec::new();
    for path in &paths {
        match load_file(path) {
            Ok(loaded) => files.push(loaded),
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!("excluding {}: {e}", path.display());
                excluded.push(e);
            }
        }
    }

    Ok(ClassData {
        dir: dir.to_path_buf(),
        files,
        excluded,
    })
}
