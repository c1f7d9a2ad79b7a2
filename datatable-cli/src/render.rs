//! Plain-text table output.

use std::fmt::Write;

use datatable_lib::model::Record;
use datatable_lib::{Column, TableView};

const SEPARATOR: &str = " | ";
const EMPTY_STATE: &str = "No data available";

/// Renders the current page of a view as an aligned text table.
pub fn render_table(view: &TableView<'_, Record>, columns: &[&Column<Record>]) -> String {
    let mut out = String::new();
    let rows = view.page_rows();

    if rows.is_empty() || columns.is_empty() {
        out.push_str(EMPTY_STATE);
        out.push('\n');
    } else {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| columns.iter().map(|c| c.display(row)).collect())
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(c.header_text().chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<&str> = columns.iter().map(|c| c.header_text()).collect();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(rule.join("-+-").trim_end());
        out.push('\n');
        for row in &cells {
            push_line(&mut out, row, &widths);
        }
    }

    let summary = view.summary();
    if summary.total > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", summary);
        let _ = writeln!(out, "Page {} of {}", view.current_page(), view.total_pages());
    }
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    out.push_str(padded.join(SEPARATOR).trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use datatable_lib::TableEngine;

    use super::*;

    fn engine() -> TableEngine<Record> {
        let data = vec![
            Record::new().set("name", "Alice").set("status", "booked"),
            Record::new().set("name", "Bob"),
            Record::new().set("name", "Charlotte").set("status", "lead"),
        ];
        let columns = vec![Column::new("name").header("Client"), Column::new("status")];
        TableEngine::new(data, columns).with_items_per_page(2)
    }

    #[test]
    fn test_render_first_page() {
        let engine = engine();
        let columns: Vec<&Column<Record>> = engine.columns().iter().collect();
        let text = render_table(&engine.view(), &columns);
        let expected = "\
Client | status
-------+-------
Alice  | booked
Bob    | -

Showing 1 to 2 of 3 results
Page 1 of 2
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_page() {
        let mut engine = engine();
        engine.handle_filter("name", "zzz");
        let columns: Vec<&Column<Record>> = engine.columns().iter().collect();
        assert_eq!(render_table(&engine.view(), &columns), "No data available\n");
    }
}
