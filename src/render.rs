//! Column-aligned plain-text tables for previews.

use std::borrow::Cow;
use std::iter;

use crate::data::Value;

/// Text shown for null cells.
pub const NULL_MARKER: &str = "<null>";

const GAP: &str = "  ";
const MIN_RULE_WIDTH: usize = 3;
const LINE_BREAKS: [char; 3] = ['\n', '\r', '\t'];

type Cell<'a> = Option<Cow<'a, str>>;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let cells = rows
        .iter()
        .map(|row| row.iter().map(|text| Some(Cow::Borrowed(text.as_str()))).collect())
        .collect::<Vec<Vec<Cell<'_>>>>();
    render_cells(headers, &cells)
}

/// Renders typed cells, showing nulls as [`NULL_MARKER`].
pub fn render_values(headers: &[String], rows: &[Vec<Option<Value>>]) -> String {
    let cells = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| value.as_ref().map(|v| Cow::Owned(v.as_display())))
                .collect()
        })
        .collect::<Vec<Vec<Cell<'_>>>>();
    render_cells(headers, &cells)
}

fn render_cells(headers: &[String], rows: &[Vec<Cell<'_>>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| visible_width(header).max(1))
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(visible_width(cell_text(cell)));
        }
    }

    let rule_widths = widths
        .iter()
        .map(|width| (*width).max(MIN_RULE_WIDTH))
        .collect::<Vec<_>>();
    let rules = rule_widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>();

    let mut output = String::new();
    push_line(&mut output, headers.iter().map(String::as_str), &widths);
    push_line(&mut output, rules.iter().map(String::as_str), &rule_widths);
    for row in rows {
        push_line(&mut output, row.iter().map(cell_text), &widths);
    }
    output
}

fn cell_text<'c>(cell: &'c Cell<'_>) -> &'c str {
    cell.as_deref().unwrap_or(NULL_MARKER)
}

fn push_line<'t>(output: &mut String, texts: impl Iterator<Item = &'t str>, widths: &[usize]) {
    let mut line = String::new();
    for (idx, (text, width)) in texts.zip(widths).enumerate() {
        if idx > 0 {
            line.push_str(GAP);
        }
        let text = flatten(text);
        line.push_str(&text);
        line.extend(iter::repeat_n(' ', width.saturating_sub(visible_width(&text))));
    }
    output.push_str(line.trim_end_matches(' '));
    output.push('\n');
}

/// Character count excluding ANSI color sequences such as `\x1b[31m`.
fn visible_width(text: &str) -> usize {
    let mut in_escape = false;
    text.chars()
        .filter(|&ch| {
            if in_escape {
                in_escape = ch != 'm';
                false
            } else if ch == '\u{1b}' {
                in_escape = true;
                false
            } else {
                true
            }
        })
        .count()
}

fn flatten(text: &str) -> Cow<'_, str> {
    if !text.contains(LINE_BREAKS) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|ch| if LINE_BREAKS.contains(&ch) { ' ' } else { ch })
            .collect(),
    )
}
