//! Builds tables from buffered pipe-delimited lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::Table;
use crate::prose::strip_math;

static ALIGNMENT_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("valid alignment regex"));

/// True for alignment rows such as `|---|:---:|`.
pub fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    !inner.trim().is_empty()
        && inner
            .split('|')
            .all(|cell| ALIGNMENT_CELL.is_match(cell.trim()))
}

fn clean_cell(cell: &str) -> String {
    strip_math(cell.trim()).into_owned()
}

/// Turn buffered table lines into a [`Table`].
///
/// Separator rows are dropped. Returns `None` when no row is left or the
/// header row has no non-empty cell. Data rows keep at most one cell per
/// header; rows with fewer cells stay short.
pub fn build_table(lines: &[&str]) -> Option<Table> {
    let mut rows = lines.iter().copied().filter(|line| !is_separator_row(line));

    let header_row = rows.next()?;
    let headers: Vec<String> = header_row
        .split('|')
        .filter(|cell| !cell.trim().is_empty())
        .map(clean_cell)
        .collect();
    if headers.is_empty() {
        return None;
    }

    let rows: Vec<Vec<String>> = rows
        .map(|row| {
            let skip = usize::from(row.trim().starts_with('|'));
            row.split('|')
                .skip(skip)
                .take(headers.len())
                .map(clean_cell)
                .collect::<Vec<_>>()
        })
        .collect();

    Some(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn separator_rows() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("| :--- | ---: | :-: |"));
        assert!(is_separator_row("  |---|"));
        assert!(!is_separator_row("| A | B |"));
        assert!(!is_separator_row("| --- | x |"));
        assert!(!is_separator_row("| |"));
    }

    #[test]
    fn header_and_rows() {
        let table = build_table(&["| A | B |", "|---|---|", "| 1 | 2 |"]).unwrap();
        assert_eq!(table.headers, strings(&["A", "B"]));
        assert_eq!(table.rows, vec![strings(&["1", "2"])]);
    }

    #[test]
    fn header_only() {
        let table = build_table(&["| Step | Cost |", "| --- | --- |"]).unwrap();
        assert_eq!(table.headers, strings(&["Step", "Cost"]));
        assert!(table.rows.is_empty());
    }

    #[test]
    fn only_separators_yield_nothing() {
        assert_eq!(build_table(&["|---|---|"]), None);
        assert_eq!(build_table(&[]), None);
    }

    #[test]
    fn empty_header_yields_nothing() {
        assert_eq!(build_table(&["| | |", "| a | b |"]), None);
    }

    #[test]
    fn long_rows_are_truncated() {
        let table = build_table(&["| A | B |", "| 1 | 2 | 3 | 4 |"]).unwrap();
        assert_eq!(table.rows, vec![strings(&["1", "2"])]);
    }

    #[test]
    fn short_rows_stay_short() {
        let table = build_table(&["| A | B | C |", "| 1"]).unwrap();
        assert_eq!(table.rows, vec![strings(&["1"])]);
    }

    #[test]
    fn empty_cells_are_kept_in_rows() {
        let table = build_table(&["| A | B |", "| | 2 |"]).unwrap();
        assert_eq!(table.rows, vec![strings(&["", "2"])]);
    }

    #[test]
    fn math_signs_are_stripped() {
        let table = build_table(&["| $n$ | Time |", "| $10^5$ | O(n) |"]).unwrap();
        assert_eq!(table.headers, strings(&["n", "Time"]));
        assert_eq!(table.rows, vec![strings(&["10^5", "O(n)"])]);
    }
}
