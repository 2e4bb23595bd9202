//! Plain-text table rendering
//!
//! Builds aligned rows as styled lines. Widths are measured in terminal
//! columns so names with wide characters still line up.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;

/// Cut `text` to at most `width` columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pad `text` with spaces to exactly `width` columns
pub fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let fill = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(fill))
}

/// Build table lines from headers and rows
pub fn build_table_lines(headers: &[&str], rows: &[Vec<String>]) -> Vec<Line<'static>> {
    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.width());
            }
        }
    }
    for width in &mut col_widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header_spans: Vec<Span> = headers
        .iter()
        .zip(&col_widths)
        .flat_map(|(h, width)| {
            vec![
                Span::styled(
                    pad_to_width(h, *width),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" │ "),
            ]
        })
        .collect();
    lines.push(Line::from(header_spans));

    let separator: String = col_widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    lines.push(Line::from(Span::styled(
        separator,
        Style::default().fg(Color::DarkGray),
    )));

    for row in rows {
        let row_spans: Vec<Span> = row
            .iter()
            .zip(&col_widths)
            .flat_map(|(cell, width)| {
                vec![
                    Span::styled(pad_to_width(cell, *width), Style::default().fg(Color::White)),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(row_spans));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate_to_width("Alice", 10), "Alice");
        assert_eq!(truncate_to_width("Alexandria", 5), "Alex…");
    }

    #[test]
    fn test_pad_counts_wide_characters() {
        let padded = pad_to_width("李雷", 6);
        assert_eq!(padded.width(), 6);
        assert_eq!(padded, "李雷  ");
    }

    #[test]
    fn test_table_lines_header_separator_rows() {
        let rows = vec![
            vec!["Alice".to_string(), "2022-ag-0001".to_string()],
            vec!["Bob".to_string(), "2022-ag-0002".to_string()],
        ];
        let lines = build_table_lines(&["Name", "AG Number"], &rows);

        assert_eq!(lines.len(), 4);
        let first_row: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(first_row.starts_with("Alice │ 2022-ag-0001"));
    }
}
