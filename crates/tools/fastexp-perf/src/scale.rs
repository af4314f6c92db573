//! Shared y-axis scale for all panels of a precision class.

use std::ops::Range;

use crate::error::PlotError;
use crate::loader::ClassData;
use crate::results::LoadedFile;

/// Lower bound of the log-scale y axis.
///
/// Timings are assumed to be at least one time unit. Smaller values are not
/// clamped.
pub const LOG_FLOOR: f64 = 1.0;

/// Y-axis range shared by every panel of a precision class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedScale {
    /// Lower bound, always [`LOG_FLOOR`].
    pub floor: f64,
    /// Largest baseline mean across all files of the class.
    pub t_max: f64,
}

impl SharedScale {
    /// Computes the scale from the loaded files of a class.
    ///
    /// Returns [`PlotError::EmptyDataset`] if no file was loaded.
    pub fn compute(data: &ClassData) -> Result<Self, PlotError> {
        Self::from_files(&data.files).ok_or_else(|| PlotError::EmptyDataset {
            dir: data.dir.clone(),
        })
    }

    /// Anchors the scale at the slowest baseline of `files`.
    pub fn from_files(files: &[LoadedFile]) -> Option<Self> {
        files
            .iter()
            .map(LoadedFile::baseline_mean)
            .reduce(f64::max)
            .map(|t_max| Self {
                floor: LOG_FLOOR,
                t_max,
            })
    }

    /// Axis range, `floor..t_max`.
    pub fn range(&self) -> Range<f64> {
        self.floor..self.t_max
    }
}
