//! Roster entry screen
//!
//! A two-field form (name and AG number) beside the current roster.
//! Submitting emits `Action::AddStudent`; validation happens in the App.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{
    calculate_screen_layout, render_header, render_help_bar, render_status_bar,
};
use crate::components::table::build_table_lines;
use crate::model::{NewStudent, StatusLine, Student};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which form field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    AgNumber,
}

impl FormField {
    fn toggle(&self) -> FormField {
        match self {
            FormField::Name => FormField::AgNumber,
            FormField::AgNumber => FormField::Name,
        }
    }
}

/// Roster entry form
#[derive(Default)]
pub struct AddStudentsComponent {
    pub name: String,
    pub ag_number: String,
    pub focus: FormField,
}

impl AddStudentsComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty both fields after a successful submit
    pub fn clear_form(&mut self) {
        self.name.clear();
        self.ag_number.clear();
        self.focus = FormField::Name;
    }

    pub fn candidate(&self) -> NewStudent {
        NewStudent::new(self.name.clone(), self.ag_number.clone())
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::AgNumber => &mut self.ag_number,
        }
    }
}

impl Component for AddStudentsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => Ok(Some(Action::GoHome)),
            KeyCode::Enter => Ok(Some(Action::AddStudent(self.candidate()))),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.toggle();
                Ok(None)
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                Ok(None)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_mut().push(c);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_add_students_screen which takes the roster
        Ok(())
    }
}

/// Data the roster entry screen shows
pub struct AddStudentsRenderContext<'a> {
    pub roster: &'a [Student],
    pub status: Option<&'a StatusLine>,
}

/// Draw the roster entry screen
pub fn draw_add_students_screen(
    frame: &mut Frame,
    area: Rect,
    form: &AddStudentsComponent,
    ctx: &AddStudentsRenderContext,
) -> Result<()> {
    let layout = calculate_screen_layout(area);

    render_header(frame, layout.header, "Add New Student", None);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout.body);

    render_form(frame, columns[0], form);
    render_roster(frame, columns[1], ctx.roster);

    render_status_bar(frame, layout.status, ctx.status);
    render_help_bar(
        frame,
        layout.help,
        &[("Tab", "Next field"), ("Enter", "Add Student"), ("Esc", "Back to Home")],
    );

    Ok(())
}

fn render_form(frame: &mut Frame, area: Rect, form: &AddStudentsComponent) {
    let field = |label: &str, value: &str, focused: bool| -> Vec<Line<'static>> {
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cursor = if focused { "_" } else { "" };
        vec![
            Line::from(Span::styled(label.to_string(), label_style)),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{}{}", value, cursor),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ]
    };

    let mut lines = vec![Line::from("")];
    lines.extend(field("Name", &form.name, form.focus == FormField::Name));
    lines.extend(field(
        "AG Number (YYYY-ag-XXXX)",
        &form.ag_number,
        form.focus == FormField::AgNumber,
    ));
    if form.ag_number.is_empty() {
        lines.push(Line::from(Span::styled(
            "e.g. 2022-ag-7693",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Student ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn render_roster(frame: &mut Frame, area: Rect, roster: &[Student]) {
    let lines = if roster.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "No students yet",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        let rows: Vec<Vec<String>> = roster
            .iter()
            .map(|s| vec![s.name.clone(), s.ag_number.clone()])
            .collect();
        build_table_lines(&["Name", "AG Number"], &rows)
    };

    let scroll = roster_scroll(lines.len(), area.height);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Roster ({}) ", roster.len()))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Rows to skip so the newest students stay visible inside a bordered panel
fn roster_scroll(line_count: usize, panel_height: u16) -> u16 {
    let visible = panel_height.saturating_sub(2) as usize;
    u16::try_from(line_count.saturating_sub(visible)).unwrap_or(u16::MAX)
}
