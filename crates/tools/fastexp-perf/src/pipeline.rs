//! One parameterized pipeline per precision class.
//!
//! `Discover → Load → ComputeScale → ComposeAll → Render`. A failure aborts
//! only the class being processed; callers run each class independently.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::PlotError;
use crate::grid::Grid;
use crate::loader::{self, ClassData};
use crate::panel::compose_panel;
use crate::render::render_grid;
use crate::scale::SharedScale;
use crate::style::PlotStyle;

/// A precision class: where its results are and where its chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionClass {
    /// Short name, e.g. `single` or `double`.
    pub name: String,
    /// Directory holding the `*.dat` result files.
    pub input: PathBuf,
    /// Composite image path.
    pub output: PathBuf,
}

/// A class that has been loaded, scaled and laid out, ready to render.
#[derive(Debug)]
pub struct PreparedClass {
    /// The class being processed.
    pub class: PrecisionClass,
    /// Loaded files; files excluded at load time are in `data.excluded`.
    pub data: ClassData,
    /// Shared y-axis scale.
    pub scale: SharedScale,
    /// Panel grid.
    pub grid: Grid,
    /// Files whose panel could not be composed.
    pub rejected: Vec<PlotError>,
}

impl PreparedClass {
    /// Number of files left out of the grid, for any reason.
    pub fn excluded_count(&self) -> usize {
        self.data.excluded.len() + self.rejected.len()
    }

    /// All per-file diagnostics, load failures first.
    pub fn diagnostics(&self) -> impl Iterator<Item = &PlotError> {
        self.data.excluded.iter().chain(&self.rejected)
    }

    /// Renders the grid to the class output path.
    pub fn render(&self, style: &PlotStyle) -> Result<RenderReport, PlotError> {
        render_grid(&self.grid, style, &self.class.output)?;
        Ok(RenderReport {
            output: self.class.output.clone(),
            panels: self.grid.panel_count(),
            hidden: self.grid.hidden_count(),
            excluded: self.excluded_count(),
        })
    }
}

/// Summary of a rendered class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Image written.
    pub output: PathBuf,
    /// Panels drawn.
    pub panels: usize,
    /// Hidden grid cells.
    pub hidden: usize,
    /// Files left out because of errors.
    pub excluded: usize,
}

/// Final state of a precision class.
#[derive(Debug)]
pub enum ClassOutcome {
    /// The composite image was written.
    Rendered(RenderReport),
    /// There was nothing to plot.
    Skipped(PlotError),
}

/// Loads a class and lays out its panel grid without rendering.
///
/// Files that fail to load or compose are excluded with a diagnostic, or
/// abort the class when `strict` is set.
pub fn prepare(
    class: &PrecisionClass,
    style: &PlotStyle,
    strict: bool,
) -> Result<PreparedClass, PlotError> {
    debug!(class = %class.name, input = %class.input.display(), "loading results");
    let data = loader::load_class(&class.input, strict)?;
    let scale = SharedScale::compute(&data)?;
    debug!(class = %class.name, t_max = scale.t_max, "computed shared scale");

    let mut panels = Vec::with_capacity(data.files.len());
    let mut rejected = Vec::new();
    for loaded in &data.files {
        match compose_panel(panels.len(), loaded, scale, style) {
            Ok(panel) => panels.push(panel),
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!("excluding {}: {e}", loaded.file.path.display());
                rejected.push(e);
            }
        }
    }

    if panels.is_empty() {
        return Err(PlotError::EmptyDataset {
            dir: class.input.clone(),
        });
    }

    Ok(PreparedClass {
        class: class.clone(),
        grid: Grid::arrange(panels, style),
        data,
        scale,
        rejected,
    })
}

/// Runs the full pipeline for one class.
///
/// An empty class is reported as [`ClassOutcome::Skipped`] rather than an
/// error.
pub fn run(
    class: &PrecisionClass,
    style: &PlotStyle,
    strict: bool,
) -> Result<ClassOutcome, PlotError> {
    match prepare(class, style, strict) {
        Ok(prepared) => prepared.render(style).map(ClassOutcome::Rendered),
        Err(e @ PlotError::EmptyDataset { .. }) => {
            warn!("skipping {} precision: {e}", class.name);
            Ok(ClassOutcome::Skipped(e))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::grid::GridCell;

    fn write(dir: &Path, name: &str, standard_mean: f64) {
        let text = format!(
            "IEEE 32 4.0 0.1\nIEEE 64 5.0 0.1\nProduct 32 2.0 0.1\nProduct 64 2.5 0.1\nStandard 0 {standard_mean} 0.5\n"
        );
        std::fs::write(dir.join(name), text).unwrap();
    }

    fn class(dir: &Path) -> PrecisionClass {
        PrecisionClass {
            name: "single".into(),
            input: dir.to_path_buf(),
            output: dir.join("single_precision.png"),
        }
    }

    fn title(grid: &Grid, row: usize, col: usize) -> Option<String> {
        match grid.cell(row, col)? {
            GridCell::Panel(panel) => Some(panel.title.clone()),
            GridCell::Hidden => None,
        }
    }

    #[test]
    fn two_file_class() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gcc__v9.dat", 10.0);
        write(dir.path(), "clang__v12.dat", 15.0);

        let prepared = prepare(&class(dir.path()), &PlotStyle::default(), false).unwrap();
        assert_eq!(prepared.scale.t_max, 15.0);
        assert_eq!(prepared.grid.shape.rows, 2);
        assert_eq!(prepared.grid.shape.columns, 2);
        assert_eq!(prepared.grid.hidden_count(), 2);
        assert_eq!(prepared.excluded_count(), 0);

        // Discovery is ordered by file name.
        assert_eq!(title(&prepared.grid, 0, 0).as_deref(), Some("clang (v12)"));
        assert_eq!(title(&prepared.grid, 0, 1).as_deref(), Some("gcc (v9)"));
        assert!(title(&prepared.grid, 1, 0).is_none());
        assert!(title(&prepared.grid, 1, 1).is_none());

        for panel in prepared.grid.panels() {
            assert_eq!(panel.tick_count(), 2 + 2 + 1);
            assert_eq!(panel.scale, prepared.scale);
        }
    }

    #[test]
    fn malformed_filename_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gcc__v9.dat", 10.0);
        write(dir.path(), "gccv9.dat", 99.0);

        let prepared = prepare(&class(dir.path()), &PlotStyle::default(), false).unwrap();
        assert_eq!(prepared.grid.panel_count(), 1);
        assert_eq!(prepared.scale.t_max, 10.0);
        assert_eq!(prepared.excluded_count(), 1);
        assert!(matches!(
            prepared.diagnostics().next(),
            Some(PlotError::MalformedFilename { .. })
        ));
    }

    #[test]
    fn insufficient_data_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gcc__v9.dat", 10.0);
        std::fs::write(dir.path().join("icc__19.dat"), "IEEE 0 2 0\nStandard 0 30 1\n").unwrap();

        let prepared = prepare(&class(dir.path()), &PlotStyle::default(), false).unwrap();
        assert_eq!(prepared.grid.panel_count(), 1);
        // The rejected file still contributed to the shared scale.
        assert_eq!(prepared.scale.t_max, 30.0);
        assert!(matches!(
            prepared.rejected.as_slice(),
            [PlotError::InsufficientData { .. }]
        ));

        let err = prepare(&class(dir.path()), &PlotStyle::default(), true).unwrap_err();
        assert!(matches!(err, PlotError::InsufficientData { .. }));
    }

    #[test]
    fn panel_colors_follow_grid_position() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a__1.dat", 10.0);
        write(dir.path(), "a_1.dat", 10.0);
        write(dir.path(), "b__1.dat", 10.0);

        let style = PlotStyle::default();
        let prepared = prepare(&class(dir.path()), &style, false).unwrap();
        let indices: Vec<usize> = prepared.grid.panels().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1]);
        let second = prepared.grid.panels().nth(1).unwrap();
        assert_eq!(second.groups[0].color, style.palette[3]);
    }

    #[test]
    fn empty_class_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run(&class(dir.path()), &PlotStyle::default(), false).unwrap();
        assert!(matches!(
            outcome,
            ClassOutcome::Skipped(PlotError::EmptyDataset { .. })
        ));
        assert!(!dir.path().join("single_precision.png").exists());
    }

    #[test]
    fn all_files_excluded_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gccv9.dat", 10.0);
        let outcome = run(&class(dir.path()), &PlotStyle::default(), false).unwrap();
        assert!(matches!(outcome, ClassOutcome::Skipped(_)));
    }

    #[test]
    fn strict_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gcc__v9.dat", 10.0);
        write(dir.path(), "gccv9.dat", 10.0);
        let err = run(&class(dir.path()), &PlotStyle::default(), true).unwrap_err();
        assert!(matches!(err, PlotError::MalformedFilename { .. }));
    }
}
