//! Panel composition: bar positions, widths, colors and tick labels.
//!
//! A panel places three bar groups in fixed horizontal bands:
//!
//! | band | category   | offset | bars               |
//! |------|------------|--------|--------------------|
//! | 0    | `IEEE`     | 0.0    | one per row        |
//! | 1    | `Product`  | 1.1    | one per row        |
//! | 2    | `Standard` | 2.2    | the single baseline |
//!
//! Within a band of n bars, bars start at `offset + i/n` and are
//! `0.8 × 1/n` wide. The baseline bar takes its width from the `Product`
//! band rather than from its own single row.

use std::ops::Range;

use crate::error::PlotError;
use crate::results::{Category, LoadedFile, Measurement};
use crate::scale::SharedScale;
use crate::style::{PlotStyle, Rgb};

/// Horizontal start of each band, indexed by [`Category::band_index`].
pub const BAND_OFFSETS: [f64; 3] = [0.0, 1.1, 2.2];

/// Width of the x range a band's bars are spread over.
pub const BAND_WIDTH: f64 = 1.0;

/// Fraction of a bar slot filled by the bar.
pub const BAR_FILL: f64 = 0.8;

/// Padding added on both sides of the outermost bars.
const X_PADDING: f64 = 0.1;

/// Tick label of the baseline bar.
pub const BASELINE_LABEL: &str = "Std. Lib.";

/// A single bar with its error whisker.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Bar center.
    pub x: f64,
    /// Bar width.
    pub width: f64,
    /// Bar height (mean timing).
    pub mean: f64,
    /// Whisker half-length (timing error).
    pub error: f64,
    /// X tick label.
    pub label: String,
}

impl Bar {
    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// The bars of one category within a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    /// Category shown by this group.
    pub category: Category,
    /// Bar fill color.
    pub color: Rgb,
    /// Error whisker color.
    pub whisker: Rgb,
    /// Bars in ascending parameter order.
    pub bars: Vec<Bar>,
}

/// One result file rendered as a grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Position of the panel within its grid.
    pub index: usize,
    /// Panel title, `implementation (version)`.
    pub title: String,
    /// IEEE, Product and Standard groups, in band order.
    pub groups: [BarGroup; 3],
    /// Shared y-axis range.
    pub scale: SharedScale,
}

impl Panel {
    /// X tick positions and labels, one per bar, in band order.
    pub fn ticks(&self) -> impl Iterator<Item = (f64, &str)> {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter())
            .map(|bar| (bar.x, bar.label.as_str()))
    }

    /// Number of x ticks.
    pub fn tick_count(&self) -> usize {
        self.groups.iter().map(|g| g.bars.len()).sum()
    }

    /// X range covering every bar plus a small margin.
    pub fn x_range(&self) -> Range<f64> {
        let bars = || self.groups.iter().flat_map(|g| g.bars.iter());
        let lo = bars().map(Bar::left).fold(f64::INFINITY, f64::min);
        let hi = bars().map(Bar::right).fold(f64::NEG_INFINITY, f64::max);
        (lo - X_PADDING)..(hi + X_PADDING)
    }

    /// Longest tick label, in characters.
    pub fn longest_label(&self) -> usize {
        self.ticks()
            .map(|(_, label)| label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Bar centers for `n` bars spread over the band starting at `offset`.
///
/// Equivalent to the first `n` points of an `n + 1` point linear space over
/// `offset..=offset + BAND_WIDTH`.
fn band_positions(offset: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = BAND_WIDTH / n as f64;
    (0..n).map(move |i| offset + i as f64 * step)
}

/// Bar width for a band holding `n` bars.
fn bar_width(n: usize) -> f64 {
    BAR_FILL * (BAND_WIDTH / n as f64)
}

/// Tick label of a variant bar, e.g. `IEEE, 2`.
fn variant_label(category: Category, parameter: f64) -> String {
    // Parameters are whole numbers in practice; truncate like an integer cast.
    format!("{}, {}", category.label(), parameter.trunc() as i64)
}

/// Lays out the bars of a variant band.
fn variant_bars(category: Category, rows: &[Measurement]) -> Vec<Bar> {
    let width = bar_width(rows.len());
    band_positions(BAND_OFFSETS[category.band_index()], rows.len())
        .zip(rows)
        .map(|(x, row)| Bar {
            x,
            width,
            mean: row.mean,
            error: row.error,
            label: variant_label(category, row.parameter),
        })
        .collect()
}

/// Composes the panel of one loaded file.
///
/// `index` is the panel's position in the grid and selects its colors.
/// Fails with [`PlotError::InsufficientData`] if the IEEE or Product band is
/// empty.
pub fn compose_panel(
    index: usize,
    loaded: &LoadedFile,
    scale: SharedScale,
    style: &PlotStyle,
) -> Result<Panel, PlotError> {
    let results = &loaded.results;
    for category in [Category::Ieee, Category::Product] {
        if results.get(category).is_empty() {
            return Err(PlotError::InsufficientData {
                path: loaded.file.path.clone(),
                category,
            });
        }
    }
    let baseline = results
        .baseline()
        .ok_or_else(|| PlotError::MissingCategory {
            path: loaded.file.path.clone(),
            category: Category::Standard,
            found: results.get(Category::Standard).len(),
        })?;

    let group = |category: Category, bars: Vec<Bar>| BarGroup {
        category,
        color: style.bar_color(index, category),
        whisker: style.whisker_color(index, category),
        bars,
    };

    let product_rows = results.get(Category::Product);
    let baseline_bar = Bar {
        x: BAND_OFFSETS[Category::Standard.band_index()],
        // Inherited from the Product band.
        width: bar_width(product_rows.len()),
        mean: baseline.mean,
        error: baseline.error,
        label: BASELINE_LABEL.to_string(),
    };

    Ok(Panel {
        index,
        title: loaded.file.title(),
        groups: [
            group(
                Category::Ieee,
                variant_bars(Category::Ieee, results.get(Category::Ieee)),
            ),
            group(
                Category::Product,
                variant_bars(Category::Product, product_rows),
            ),
            group(Category::Standard, vec![baseline_bar]),
        ],
        scale,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::loader::parse_results;
    use crate::results::ResultFile;

    const EPS: f64 = 1e-12;

    fn loaded(name: &str, text: &str) -> LoadedFile {
        LoadedFile {
            file: ResultFile::from_path(Path::new(name)).unwrap(),
            results: parse_results(Path::new(name), text).unwrap(),
        }
    }

    fn scale() -> SharedScale {
        SharedScale {
            floor: 1.0,
            t_max: 100.0,
        }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    const FILE: &str = "\
IEEE 0 40 1
IEEE 1 45 1
IEEE 2 50 1
Product 8 20 0.5
Product 10 22 0.5
Standard 0 60 2
";

    #[test]
    fn ieee_band_layout() {
        let panel = compose_panel(0, &loaded("gcc__v9.dat", FILE), scale(), &PlotStyle::default())
            .unwrap();
        let ieee = &panel.groups[0];
        assert_eq!(ieee.category, Category::Ieee);
        let xs: Vec<f64> = ieee.bars.iter().map(|b| b.x).collect();
        assert_close(xs[0], 0.0);
        assert_close(xs[1], 1.0 / 3.0);
        assert_close(xs[2], 2.0 / 3.0);
        for bar in &ieee.bars {
            assert_close(bar.width, 0.8 / 3.0);
        }
        assert_eq!(ieee.bars[2].label, "IEEE, 2");
        assert_eq!(ieee.bars[2].mean, 50.0);
    }

    #[test]
    fn product_band_layout() {
        let panel = compose_panel(0, &loaded("gcc__v9.dat", FILE), scale(), &PlotStyle::default())
            .unwrap();
        let product = &panel.groups[1];
        assert_close(product.bars[0].x, 1.1);
        assert_close(product.bars[1].x, 1.6);
        assert_close(product.bars[0].width, 0.4);
        let labels: Vec<&str> = product.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Product, 8", "Product, 10"]);
    }

    #[test]
    fn baseline_width_comes_from_product_band() {
        let panel = compose_panel(0, &loaded("gcc__v9.dat", FILE), scale(), &PlotStyle::default())
            .unwrap();
        let standard = &panel.groups[2];
        assert_eq!(standard.bars.len(), 1);
        let bar = &standard.bars[0];
        assert_close(bar.x, 2.2);
        // Two Product rows: 0.8 / 2, not 0.8 / 1.
        assert_close(bar.width, 0.4);
        assert_eq!(bar.label, BASELINE_LABEL);
        assert_eq!(bar.error, 2.0);
    }

    #[test]
    fn bands_do_not_overlap() {
        let panel = compose_panel(0, &loaded("gcc__v9.dat", FILE), scale(), &PlotStyle::default())
            .unwrap();
        for pair in panel.groups.windows(2) {
            let end = pair[0].bars.iter().map(Bar::right).fold(f64::MIN, f64::max);
            let start = pair[1].bars.iter().map(Bar::left).fold(f64::MAX, f64::min);
            assert!(end < start, "{end} >= {start}");
        }
    }

    #[test]
    fn tick_count_matches_rows() {
        let panel = compose_panel(0, &loaded("gcc__v9.dat", FILE), scale(), &PlotStyle::default())
            .unwrap();
        assert_eq!(panel.tick_count(), 3 + 2 + 1);
        assert_eq!(panel.ticks().count(), panel.tick_count());
        let labels: Vec<&str> = panel.ticks().map(|(_, l)| l).collect();
        assert_eq!(labels.last(), Some(&BASELINE_LABEL));
    }

    #[test]
    fn title_and_scale() {
        let panel = compose_panel(
            1,
            &loaded("clang__v12.dat", FILE),
            scale(),
            &PlotStyle::default(),
        )
        .unwrap();
        assert_eq!(panel.title, "clang (v12)");
        assert_eq!(panel.index, 1);
        assert_eq!(panel.scale, scale());
    }

    #[test]
    fn colors_depend_on_panel_index() {
        let style = PlotStyle::default();
        let file = loaded("gcc__v9.dat", FILE);
        let first = compose_panel(0, &file, scale(), &style).unwrap();
        let second = compose_panel(1, &file, scale(), &style).unwrap();
        assert_eq!(first.groups[0].color, style.palette[0]);
        assert_eq!(first.groups[1].color, style.palette[1]);
        assert_eq!(second.groups[0].color, style.palette[3]);
        assert_ne!(first.groups[0].color, second.groups[0].color);
    }

    #[test]
    fn parameters_are_truncated() {
        let text = "IEEE 32.9 5 0\nProduct 8 5 0\nStandard 0 9 0\n";
        let panel = compose_panel(0, &loaded("gcc__v9.dat", text), scale(), &PlotStyle::default())
            .unwrap();
        assert_eq!(panel.groups[0].bars[0].label, "IEEE, 32");
    }

    #[test]
    fn x_range_covers_all_bars() {
        let panel = compose_panel(0, &loaded("gcc__v9.dat", FILE), scale(), &PlotStyle::default())
            .unwrap();
        let range = panel.x_range();
        assert_close(range.start, -0.4 / 3.0 - 0.1);
        assert_close(range.end, 2.2 + 0.2 + 0.1);
    }

    #[test]
    fn empty_variant_band_is_insufficient() {
        let text = "IEEE 0 5 0\nStandard 0 9 0\n";
        let err = compose_panel(0, &loaded("gcc__v9.dat", text), scale(), &PlotStyle::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PlotError::InsufficientData {
                category: Category::Product,
                ..
            }
        ));
    }
}
