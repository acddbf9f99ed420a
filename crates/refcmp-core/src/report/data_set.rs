//! Markdown summary of a [`DataSetComparison`].

use crate::dataset::{DataSetComparison, Datum, RowComparison, TableComparison};
use crate::reflect::render_value;

/// Render a Markdown summary listing, per table, the rows that were not
/// found together with the closest actual row and its differing columns.
pub fn render_data_set_comparison(comparison: &DataSetComparison) -> String {
    let mut out = String::new();

    out.push_str("## Data Set Comparison\n\n");
    let result = if comparison.is_match() {
        "Match"
    } else {
        "Mismatch"
    };
    out.push_str(&format!(
        "**Result**: {}  \n**Tables**: {}\n\n",
        result,
        comparison.table_comparisons.len()
    ));

    if comparison.is_match() {
        out.push_str("_All expected rows were found._\n");
        return out;
    }

    for table in comparison.mismatched_tables() {
        render_table(&mut out, table);
    }
    out
}

fn render_table(out: &mut String, table: &TableComparison) {
    out.push_str(&format!("### Table `{}`\n\n", table.table));
    out.push_str(&format!(
        "- **Expected rows**: {}, **matched**: {}, **missing**: {}\n",
        table.best_row_comparisons.len(),
        table.matched_row_count(),
        table.missing_rows.len()
    ));
    if table.expected_no_more_records_but_found_more {
        out.push_str("- **Expected no more records, but found more rows**\n");
    }
    out.push('\n');

    for (n, missing) in table.missing_rows.iter().enumerate() {
        out.push_str(&format!("#### Missing row {}\n\n", n + 1));
        match table.best_row_comparison(missing) {
            Some(best) => render_best(out, best),
            None => out.push_str("_No comparison recorded._\n\n"),
        }
    }
}

fn render_best(out: &mut String, best: &RowComparison) {
    let Some(actual) = &best.actual else {
        out.push_str("_No candidate rows in the table._\n\n");
        return;
    };

    if let Some(id) = &actual.identifier {
        out.push_str(&format!("Closest actual row: `{}`\n\n", id));
    }
    out.push_str("| Column | Expected | Actual |\n|---|---|---|\n");
    for diff in &best.column_differences {
        out.push_str(&format!(
            "| {} | `{}` | {} |\n",
            diff.column_name,
            datum(&diff.expected_value),
            diff.actual_value
                .as_ref()
                .map(|v| format!("`{}`", datum(v)))
                .unwrap_or_else(|| "_missing column_".to_string())
        ));
    }
    out.push('\n');
}

fn datum(value: &Datum) -> String {
    render_value(value)
}
