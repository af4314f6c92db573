//! Two-column grid arrangement of the panels of a precision class.

use crate::panel::Panel;
use crate::style::PlotStyle;

/// Number of grid columns.
pub const GRID_COLUMNS: usize = 2;

/// Rows and columns of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns, always [`GRID_COLUMNS`].
    pub columns: usize,
}

impl GridShape {
    /// Shape of the grid holding `n` panels.
    ///
    /// Uses `n / 2 + 1` rows, which leaves a fully hidden last row when `n`
    /// is even.
    pub fn for_panels(n: usize) -> Self {
        Self {
            rows: n / GRID_COLUMNS + 1,
            columns: GRID_COLUMNS,
        }
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }

    /// Image size in pixels for square cells of `cell_size`.
    pub fn image_size(&self, cell_size: u32) -> (u32, u32) {
        let dim = |n: usize| u32::try_from(n).unwrap_or(u32::MAX).saturating_mul(cell_size);
        (dim(self.columns), dim(self.rows))
    }
}

/// Content of one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    /// A drawn panel.
    Panel(Panel),
    /// An unused cell: no axes, frame, ticks or content.
    Hidden,
}

impl GridCell {
    /// Returns `true` for an unused cell.
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Label areas and margins shared by every panel of a grid.
///
/// Computed once from the panel contents so that tick labels are not clipped
/// and no more whitespace is reserved than needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TightLayout {
    /// Outer margin of each panel, in pixels.
    pub margin: u32,
    /// Height reserved below the plot for rotated x tick labels.
    pub x_label_area: u32,
    /// Width reserved left of the plot for y tick labels.
    pub y_label_area: u32,
}

/// Average glyph advance relative to the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// Space between the axis and its labels.
const LABEL_GAP: u32 = 8;

/// Outer panel margin.
const PANEL_MARGIN: u32 = 6;

impl TightLayout {
    /// Fits the label areas to the longest tick labels of `panels`.
    pub fn fit(panels: &[&Panel], style: &PlotStyle) -> Self {
        let glyph = f64::from(style.tick_font_size) * GLYPH_ASPECT;
        let text_extent = |chars: usize| (chars as f64 * glyph).ceil() as u32 + LABEL_GAP;

        let longest_x = panels.iter().map(|p| p.longest_label()).max().unwrap_or(0);
        // Log-axis labels are at most as wide as the formatted t_max.
        let longest_y = panels
            .iter()
            .map(|p| format!("{:.0}", p.scale.t_max).len())
            .max()
            .unwrap_or(1);

        // Never let the labels take more than half of a cell.
        let limit = style.cell_size / 2;
        Self {
            margin: PANEL_MARGIN,
            x_label_area: text_extent(longest_x).min(limit),
            y_label_area: text_extent(longest_y).max(text_extent(3)).min(limit),
        }
    }
}

/// All cells of a precision class, in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Grid dimensions.
    pub shape: GridShape,
    /// Cells in row-major order; `shape.cells()` long.
    pub cells: Vec<GridCell>,
    /// Shared label areas.
    pub layout: TightLayout,
}

impl Grid {
    /// Places `panels` row-major and hides the remaining cells.
    pub fn arrange(panels: Vec<Panel>, style: &PlotStyle) -> Self {
        let shape = GridShape::for_panels(panels.len());
        let layout = TightLayout::fit(&panels.iter().collect::<Vec<_>>(), style);

        let mut cells: Vec<GridCell> = panels.into_iter().map(GridCell::Panel).collect();
        cells.resize(shape.cells(), GridCell::Hidden);

        Self {
            shape,
            cells,
            layout,
        }
    }

    /// The cell at `row`, `column`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        if column >= self.shape.columns {
            return None;
        }
        self.cells.get(row * self.shape.columns + column)
    }

    /// Drawn panels, in grid order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Panel(panel) => Some(panel),
            GridCell::Hidden => None,
        })
    }

    /// Number of drawn panels.
    pub fn panel_count(&self) -> usize {
        self.panels().count()
    }

    /// Number of hidden cells.
    pub fn hidden_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_hidden()).count()
    }
}
