//! Tree rendering of a [`DifferenceReport`].

use crate::compare::DifferenceReport;

/// Render a difference tree, one node per line.
///
/// Leaves also show the expected (left) and actual (right) values:
///
/// ```text
/// different field values
///   owner: different object values
///     expected: "ann"
///     actual:   "bob"
/// ```
pub fn render_difference(report: &DifferenceReport) -> String {
    let mut out = String::new();
    render_node(&mut out, report, 0);
    out
}

fn render_node(out: &mut String, report: &DifferenceReport, depth: usize) {
    let indent = "  ".repeat(depth);
    if report.path.is_empty() {
        out.push_str(&format!("{}{}\n", indent, report.message));
    } else {
        out.push_str(&format!("{}{}: {}\n", indent, report.path, report.message));
    }

    if report.children.is_empty() {
        out.push_str(&format!(
            "{}  expected: {}\n{}  actual:   {}\n",
            indent,
            side(&report.left),
            indent,
            side(&report.right)
        ));
        return;
    }

    for child in &report.children {
        render_node(out, child, depth + 1);
    }
}

fn side(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<none>")
}
