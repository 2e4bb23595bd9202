//! Attendance screen
//!
//! One row per sheet entry with a radio-style status picker. The selection
//! is presentation state only; marks go through `Action::SetStatus`.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{
    calculate_screen_layout, render_header, render_help_bar, render_status_bar,
};
use crate::model::{AttendanceStatus, Sheet, StatusLine};
use crate::services::ExportFormat;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Attendance screen, owns the row selection
#[derive(Default)]
pub struct AttendanceComponent {
    pub table_state: TableState,
}

impl AttendanceComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Id of the entry under the cursor
    pub fn selected_id(&self, sheet: &Sheet) -> Option<i64> {
        self.selected()
            .and_then(|i| sheet.students.get(i))
            .map(|entry| entry.id)
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = self.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = self.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(i));
    }

    pub fn select_first(&mut self, len: usize) {
        self.table_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.table_state.select(len.checked_sub(1));
    }

    /// Move down after a mark so a class can be taken top to bottom
    pub fn advance(&mut self, len: usize) {
        self.next(len);
    }

    /// Keep the selection inside a sheet of `len` rows
    pub fn clamp(&mut self, len: usize) {
        match self.selected() {
            _ if len == 0 => self.table_state.select(None),
            None => self.table_state.select(Some(0)),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }
}

impl Component for AttendanceComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Char('p') => Some(Action::SetStatus(AttendanceStatus::Present)),
            KeyCode::Char('a') => Some(Action::SetStatus(AttendanceStatus::Absent)),
            KeyCode::Char('l') => Some(Action::SetStatus(AttendanceStatus::Leave)),
            KeyCode::Char('[') | KeyCode::Left => Some(Action::PrevDay),
            KeyCode::Char(']') | KeyCode::Right => Some(Action::NextDay),
            KeyCode::Char('t') => Some(Action::Today),
            KeyCode::Char('x') | KeyCode::Delete => Some(Action::OpenRemoveConfirm),
            KeyCode::Char('s') => Some(Action::ExportSheet),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Esc => Some(Action::GoHome),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_attendance_screen which takes the sheet
        Ok(())
    }
}

/// Data the attendance screen shows
pub struct AttendanceRenderContext<'a> {
    pub sheet: Option<&'a Sheet>,
    pub export_dir: &'a str,
    pub export_format: ExportFormat,
    pub status: Option<&'a StatusLine>,
}

fn status_color(status: AttendanceStatus) -> Color {
    match status {
        AttendanceStatus::Present => Color::Green,
        AttendanceStatus::Absent => Color::Red,
        AttendanceStatus::Leave => Color::Yellow,
        AttendanceStatus::Unmarked => Color::DarkGray,
    }
}

/// Radio group for one row, e.g. `(•) Present ( ) Absent ( ) Leave`
fn status_picker(current: AttendanceStatus) -> Line<'static> {
    let mut spans = Vec::new();
    for mark in AttendanceStatus::marks() {
        let (bullet, style) = if mark == current {
            (
                "(•) ",
                Style::default()
                    .fg(status_color(mark))
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("( ) ", Style::default().fg(Color::Gray))
        };
        spans.push(Span::styled(format!("{}{}", bullet, mark.label()), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

/// Draw the attendance screen
pub fn draw_attendance_screen(
    frame: &mut Frame,
    area: Rect,
    attendance: &mut AttendanceComponent,
    ctx: &AttendanceRenderContext,
) -> Result<()> {
    let layout = calculate_screen_layout(area);

    let date_label = ctx.sheet.map(|s| format!("Date: {}", s.date_label()));
    render_header(frame, layout.header, "Attendance Sheet", date_label.as_deref());

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(layout.body);

    match ctx.sheet {
        Some(sheet) if !sheet.is_empty() => {
            let header = Row::new(vec!["Name", "AG Number", "Status"]).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
            let rows: Vec<Row> = sheet
                .students
                .iter()
                .map(|entry| {
                    Row::new(vec![
                        Cell::from(entry.name.clone()),
                        Cell::from(entry.ag_number.clone()),
                        Cell::from(status_picker(entry.status)),
                    ])
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(30),
                    Constraint::Length(14),
                    Constraint::Min(36),
                ],
            )
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Students ({}) ", sheet.students.len()))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
            frame.render_stateful_widget(table, body[0], &mut attendance.table_state);
        }
        _ => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No students on the roster. Add some from the home menu.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Students ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty, body[0]);
        }
    }

    let summary = ctx
        .sheet
        .map(|s| s.summary().to_string())
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(summary, Style::default().fg(Color::White)),
        Span::styled(
            format!(
                "   Saves {} to {}",
                ctx.export_format.extension().to_uppercase(),
                ctx.export_dir
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(footer, body[1]);

    render_status_bar(frame, layout.status, ctx.status);
    render_help_bar(
        frame,
        layout.help,
        &[
            ("p/a/l", "Mark"),
            ("[/]", "Date"),
            ("x", "Remove last"),
            ("s", "Download"),
            ("Esc", "Home"),
        ],
    );

    Ok(())
}
