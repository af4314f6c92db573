//! Benchmark result plotting for the fastexp exponential-function benchmarks.
//!
//! Loads the `<implementation>__<version>.dat` result files written by the
//! benchmark harness, derives a shared log-scale axis per precision class,
//! lays out one grouped bar chart panel per file and renders all panels of a
//! class into a single two-column grid image.
//!
//! Pipeline per precision class: discover → load → compute scale →
//! compose panels → arrange grid → render.

pub mod error;
pub mod grid;
pub mod loader;
pub mod output;
pub mod panel;
pub mod pipeline;
pub mod render;
pub mod results;
pub mod scale;
pub mod style;

pub use error::{PlotError, RowFault};
pub use pipeline::{ClassOutcome, PrecisionClass, PreparedClass};
pub use style::{PlotStyle, Rgb};
