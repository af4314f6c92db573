//! Error types for result loading, panel composition and rendering.

use std::io;
use std::path::PathBuf;

use crate::results::Category;

/// Errors that can occur while turning result files into a chart grid.
///
/// Every variant names the file or directory at fault so a diagnostic can be
/// reported without any further context.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// A result file or directory could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    FileNotReadable {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file name does not split into `<implementation>__<version>`.
    #[error("{}: file name is not of the form `<implementation>__<version>.dat`", .path.display())]
    MalformedFilename {
        /// Offending file.
        path: PathBuf,
    },

    /// A row could not be parsed.
    #[error("{}:{line}: {fault}", .path.display())]
    MalformedRow {
        /// Offending file.
        path: PathBuf,
        /// 1-based line number of the row.
        line: usize,
        /// What is wrong with the row.
        fault: RowFault,
    },

    /// A category does not have the required number of rows.
    #[error("{}: expected exactly one `{category}` row, found {found}", .path.display())]
    MissingCategory {
        /// Offending file.
        path: PathBuf,
        /// Category with the wrong cardinality.
        category: Category,
        /// Number of rows actually found.
        found: usize,
    },

    /// A precision class has no result files to plot.
    #[error("no result files in {}", .dir.display())]
    EmptyDataset {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// A panel band has no measurements.
    #[error("{}: cannot compose a panel without `{category}` measurements", .path.display())]
    InsufficientData {
        /// Offending file.
        path: PathBuf,
        /// Empty category.
        category: Category,
    },

    /// The drawing backend failed.
    #[error("rendering {}: {message}", .path.display())]
    Render {
        /// Output image path.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },
}

/// The specific problem with a malformed row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowFault {
    /// The row does not have exactly four whitespace-separated fields.
    #[error("expected 4 fields (label, parameter, mean, error), found {found}")]
    FieldCount {
        /// Number of fields present.
        found: usize,
    },

    /// A numeric field did not hold a finite number.
    #[error("field `{field}` is not a finite number: {value:?}")]
    NotNumeric {
        /// Name of the field.
        field: &'static str,
        /// Raw text of the field.
        value: String,
    },

    /// The label is not one of `IEEE`, `Product` or `Standard`.
    #[error("unknown category label {label:?}")]
    UnknownLabel {
        /// Raw label.
        label: String,
    },

    /// Parameters of a category are not in ascending order.
    #[error("`{category}` parameter {parameter} follows {previous}; rows must be sorted by parameter")]
    OutOfOrder {
        /// Category whose rows are out of order.
        category: Category,
        /// Parameter of the preceding row.
        previous: f64,
        /// Parameter of this row.
        parameter: f64,
    },
}
