use crate::service::tabular::Column;

/// Render rows under their column headers, each cell padded or cut to
/// the column's width.
pub fn render_table<R>(columns: &[Column<R>], rows: &[&R]) -> String {
    let header: Vec<String> = columns
        .iter()
        .map(|column| pad(column.label, column.width))
        .collect();
    let mut out = header.join("  ").trim_end().to_string();
    out.push('\n');
    let total = columns.iter().map(|c| c.width + 2).sum::<usize>().saturating_sub(2);
    out.push_str(&"-".repeat(total));
    for row in rows {
        out.push('\n');
        let cells: Vec<String> = columns
            .iter()
            .map(|column| pad(&(column.render)(row), column.width))
            .collect();
        out.push_str(cells.join("  ").trim_end());
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width).collect();
    while cell.chars().count() < width {
        cell.push(' ');
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str);

    #[test]
    fn cells_are_padded_and_overflow_is_cut() {
        let columns = vec![
            Column {
                key: "a",
                label: "A",
                width: 4,
                sortable: true,
                render: |r: &Row| r.0.to_string(),
            },
            Column {
                key: "b",
                label: "B",
                width: 3,
                sortable: true,
                render: |_: &Row| "overflowing".to_string(),
            },
        ];
        let rows = vec![Row("hi")];
        let refs: Vec<&Row> = rows.iter().collect();
        let table = render_table(&columns, &refs);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "A     B");
        assert_eq!(lines[2], "hi    ove");
    }
}
