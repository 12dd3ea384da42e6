//! Table buffers become one typeset array expression.
//!
//! There is no native structured table block on the remote side, so an
//! accumulated run of pipe rows is rendered as a single fixed-column
//! math array and shipped as the expression of one equation block.

use std::sync::OnceLock;

use regex::Regex;

use super::inline::format_inline;

fn header_delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\|\s*-+\s*\|").expect("invalid header delimiter regex"))
}

/// Renders the ordered raw lines of one table buffer.
///
/// When the second line is a dash delimiter the table has a header: the
/// delimiter is discarded and the first row's cell contents are set bold.
/// Every other cell is wrapped in plain sans-serif markup. The column
/// count is the pipe-split segment count of the first line.
pub(crate) fn table_to_expression(buffer: &[String]) -> String {
    let mut rows: Vec<&str> = buffer.iter().map(String::as_str).collect();
    let has_header = rows.len() > 1 && header_delimiter_re().is_match(rows[1]);
    if has_header {
        rows.remove(1);
    }

    let mut body = String::new();
    for (row_index, row) in rows.iter().enumerate() {
        let cells = split_cells(row);
        for (cell_index, cell) in cells.iter().enumerate() {
            let cell = cell.trim();
            if row_index == 0 && has_header {
                body.push_str(&format!(
                    "\\textsf{{\\textbf{{{}}}}}",
                    first_span_text(cell)
                ));
            } else {
                body.push_str(&format!("\\textsf{{{cell}}}"));
            }
            if cell_index == cells.len() - 1 {
                body.push_str(" \\\\\\hline\n");
            } else {
                body.push_str(" & ");
            }
        }
    }

    let column_count = rows.first().map_or(0, |row| row.split('|').count());
    let column_spec = "|c".repeat(column_count);
    format!(
        "\\def\\arraystretch{{1.4}}\\begin{{array}}{{{column_spec}|}}\\hline\n{body}\\end{{array}}"
    )
}

/// Cells are the segments between consecutive pipes; text before the first
/// pipe or after the last is not a cell.
fn split_cells(row: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = row.split('|').collect();
    if segments.len() < 2 {
        return Vec::new();
    }
    segments.remove(0);
    segments.pop();
    segments
}

/// Header cells are inline-formatted and the first span's plain content is
/// what gets the bold wrap, so `**Header**` doesn't double up.
fn first_span_text(cell: &str) -> String {
    format_inline(cell)
        .first()
        .map_or_else(String::new, |span| span.plain_text().to_string())
}
