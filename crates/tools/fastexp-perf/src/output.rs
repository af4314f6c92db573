//! Terminal output formatting for loaded results and class outcomes.

use std::fmt::Write as _;

use crate::pipeline::{ClassOutcome, PreparedClass};
use crate::results::{Category, LoadedFile};

/// Fastest mean of a category, if it has any rows.
fn fastest(file: &LoadedFile, category: Category) -> Option<f64> {
    file.results
        .get(category)
        .iter()
        .map(|m| m.mean)
        .reduce(f64::min)
}

/// Formats an optional timing for a table cell.
fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

/// Formats the loaded files of a class as a table.
pub fn format_summary(prepared: &PreparedClass) -> String {
    let files = &prepared.data.files;
    let mut s = String::new();

    let _ = writeln!(
        s,
        "\n  {} precision ({} files, t_max = {:.3}):",
        prepared.class.name,
        files.len(),
        prepared.scale.t_max
    );
    if files.is_empty() {
        s.push_str("  No result files to display.\n");
        return s;
    }

    let name_width = files
        .iter()
        .map(|f| f.file.implementation.len())
        .max()
        .unwrap_or(4)
        .max("Implementation".len());
    let version_width = files
        .iter()
        .map(|f| f.file.display_version().len())
        .max()
        .unwrap_or(7)
        .max("Version".len());

    let _ = writeln!(
        s,
        "  {:<nw$}  {:<vw$}  {:>5}  {:>12}  {:>12}  {:>12}",
        "Implementation",
        "Version",
        "Rows",
        "Std. Lib.",
        "Best IEEE",
        "Best Product",
        nw = name_width,
        vw = version_width,
    );
    let _ = writeln!(
        s,
        "  {:-<nw$}  {:-<vw$}  {:->5}  {:->12}  {:->12}  {:->12}",
        "",
        "",
        "",
        "",
        "",
        "",
        nw = name_width,
        vw = version_width,
    );

    for file in files {
        let _ = writeln!(
            s,
            "  {:<nw$}  {:<vw$}  {:>5}  {:>12}  {:>12}  {:>12}",
            file.file.implementation,
            file.file.display_version(),
            file.results.len(),
            cell(file.results.baseline().map(|m| m.mean)),
            cell(fastest(file, Category::Ieee)),
            cell(fastest(file, Category::Product)),
            nw = name_width,
            vw = version_width,
        );
    }

    for diagnostic in prepared.diagnostics() {
        let _ = writeln!(s, "  excluded: {diagnostic}");
    }
    s
}

/// Print the loaded files of a class as a table.
pub fn print_summary(prepared: &PreparedClass) {
    println!("{}", format_summary(prepared));
}

/// One-line description of a class outcome.
pub fn format_outcome(class: &str, outcome: &ClassOutcome) -> String {
    match outcome {
        ClassOutcome::Rendered(report) => {
            let mut line = format!(
                "{class}: rendered {} panel(s) to {}",
                report.panels,
                report.output.display()
            );
            if report.excluded > 0 {
                let _ = write!(line, " ({} file(s) excluded)", report.excluded);
            }
            line
        }
        ClassOutcome::Skipped(reason) => format!("{class}: skipped ({reason})"),
    }
}
