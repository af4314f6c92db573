//! Grid rendering with `plotters`.
//!
//! The output format follows the file extension: `.svg` uses the SVG
//! backend, everything else the bitmap backend (PNG, JPEG, ...).

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::error::PlotError;
use crate::grid::{Grid, GridCell, TightLayout};
use crate::panel::Panel;
use crate::style::{PlotStyle, Rgb};

/// Length of an x tick mark, in pixels.
const TICK_LENGTH: i32 = 4;

/// Width of an error whisker cap, in pixels.
const WHISKER_CAP: u32 = 6;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Returns `true` if `path` should be written as SVG.
fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Renders `grid` into a single image at `output`.
///
/// The parent directory of `output` is created if needed.
pub fn render_grid(grid: &Grid, style: &PlotStyle, output: &Path) -> Result<(), PlotError> {
    let render_err = |message: String| PlotError::Render {
        path: output.to_path_buf(),
        message,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| render_err(format!("creating {}: {e}", parent.display())))?;
    }

    let size = grid.shape.image_size(style.cell_size);
    if is_svg(output) {
        let root = SVGBackend::new(output, size).into_drawing_area();
        draw_grid(&root, grid, style).map_err(|e| render_err(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output, size).into_drawing_area();
        draw_grid(&root, grid, style).map_err(|e| render_err(e.to_string()))?;
    }

    info!(
        "wrote {} ({} panels, {}x{} grid)",
        output.display(),
        grid.panel_count(),
        grid.shape.rows,
        grid.shape.columns
    );
    Ok(())
}

/// Draws every visible cell of `grid` onto `root`.
///
/// Hidden cells keep the background and nothing else.
fn draw_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &Grid,
    style: &PlotStyle,
) -> DrawResult<DB> {
    root.fill(&RGBColor::from(style.background))?;

    let areas = root.split_evenly((grid.shape.rows, grid.shape.columns));
    for (cell, area) in grid.cells.iter().zip(&areas) {
        if let GridCell::Panel(panel) = cell {
            draw_panel(area, panel, &grid.layout, style)?;
        }
    }

    root.present()
}

/// Draws one panel: log-scale axes, bars, whiskers and rotated tick labels.
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    layout: &TightLayout,
    style: &PlotStyle,
) -> DrawResult<DB> {
    let scale = panel.scale;
    let font = style.font_family.as_str();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (font, style.title_font_size))
        .margin(layout.margin)
        .x_label_area_size(layout.x_label_area)
        .y_label_area_size(layout.y_label_area)
        .build_cartesian_2d(panel.x_range(), scale.range().log_scale())?;

    // Only horizontal grid lines; x ticks sit under the bars and are drawn below.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_label_style((font, style.tick_font_size))
        .draw()?;

    for group in &panel.groups {
        let fill = RGBColor::from(group.color);
        let whisker = RGBColor::from(group.whisker);

        chart.draw_series(group.bars.iter().map(|bar| {
            Rectangle::new(
                [(bar.left(), scale.floor), (bar.right(), bar.mean)],
                fill.filled(),
            )
        }))?;

        chart.draw_series(group.bars.iter().map(|bar| {
            ErrorBar::new_vertical(
                bar.x,
                (bar.mean - bar.error).max(scale.floor),
                bar.mean,
                bar.mean + bar.error,
                whisker.stroke_width(1),
                WHISKER_CAP,
            )
        }))?;
    }

    let label_style = TextStyle::from((font, style.tick_font_size).into_font())
        .transform(FontTransform::Rotate90)
        .color(&BLACK);
    let half_glyph = i32::try_from(style.tick_font_size / 2).unwrap_or(0);
    let (base_x, base_y) = area.get_base_pixel();

    for (x, label) in panel.ticks() {
        let (px, py) = chart.backend_coord(&(x, scale.floor));
        let (px, py) = (px - base_x, py - base_y);
        area.draw(&PathElement::new(
            vec![(px, py), (px, py + TICK_LENGTH)],
            BLACK,
        ))?;
        area.draw(&Text::new(
            label.to_string(),
            (px + half_glyph, py + TICK_LENGTH + 2),
            label_style.clone(),
        ))?;
    }

    Ok(())
}
