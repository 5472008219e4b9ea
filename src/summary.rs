use prettytable::{Cell, Row, Table, format};

use crate::group::GroupedRows;

/// Terminal overview of what went into the report: one line per practice
/// that made it into the output, plus a total.
pub fn summary_table(groups: &GroupedRows) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("Practice").style_spec("b"),
        Cell::new("Orders").style_spec("br"),
    ]));

    for group in groups.non_empty() {
        let name = if group.name.is_empty() {
            "(unnamed)"
        } else {
            group.name.as_str()
        };
        table.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&group.rows.len().to_string()).style_spec("r"),
        ]));
    }

    table.add_row(Row::new(vec![
        Cell::new("TOTAL").style_spec("b"),
        Cell::new(&groups.total_rows().to_string()).style_spec("br"),
    ]));
    table
}
