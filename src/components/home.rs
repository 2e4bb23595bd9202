//! Home component - Main menu
//!
//! Entry point to the roster and attendance screens, and the roster reset.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{
    calculate_screen_layout, render_header, render_help_bar, render_status_bar,
};
use crate::model::StatusLine;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Entries of the home menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    AddStudents,
    MarkAttendance,
    ResetStudents,
}

impl MenuItem {
    pub fn all() -> [MenuItem; 3] {
        [
            MenuItem::AddStudents,
            MenuItem::MarkAttendance,
            MenuItem::ResetStudents,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            MenuItem::AddStudents => "Add Students",
            MenuItem::MarkAttendance => "Mark Attendance",
            MenuItem::ResetStudents => "Reset Student Data",
        }
    }

    fn hotkey(&self) -> &str {
        match self {
            MenuItem::AddStudents => "1",
            MenuItem::MarkAttendance => "2",
            MenuItem::ResetStudents => "r",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            MenuItem::AddStudents => Action::OpenAddStudents,
            MenuItem::MarkAttendance => Action::OpenAttendance,
            MenuItem::ResetStudents => Action::OpenResetConfirm,
        }
    }
}

/// Home menu, owns the menu selection
pub struct HomeComponent {
    pub list_state: ListState,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn selected_item(&self) -> MenuItem {
        let items = MenuItem::all();
        let idx = self.list_state.selected().unwrap_or(0).min(items.len() - 1);
        items[idx]
    }

    fn next(&mut self) {
        let len = MenuItem::all().len();
        let i = self.list_state.selected().map_or(0, |i| (i + 1) % len);
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = MenuItem::all().len();
        let i = self.list_state.selected().map_or(0, |i| (i + len - 1) % len);
        self.list_state.select(Some(i));
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Enter => Some(self.selected_item().action()),
            KeyCode::Char('1') | KeyCode::Char('a') => Some(Action::OpenAddStudents),
            KeyCode::Char('2') | KeyCode::Char('m') => Some(Action::OpenAttendance),
            KeyCode::Char('r') => Some(Action::OpenResetConfirm),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => self.next(),
            Action::PrevItem => self.previous(),
            Action::FirstItem => self.list_state.select(Some(0)),
            Action::LastItem => self.list_state.select(Some(MenuItem::all().len() - 1)),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

/// Data the home screen shows
pub struct HomeRenderContext<'a> {
    pub roster_len: usize,
    pub data_dir: &'a str,
    pub status: Option<&'a StatusLine>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_screen_layout(area);

    render_header(frame, layout.header, "Online Attendance Sheet Manager", None);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout.body);

    let items: Vec<ListItem> = MenuItem::all()
        .iter()
        .map(|item| {
            let color = match item {
                MenuItem::ResetStudents => Color::Red,
                _ => Color::White,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", item.hotkey()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(item.label().to_string(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let menu = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Menu ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(menu, columns[0], &mut home.list_state);

    let info = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Students on roster: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                ctx.roster_len.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Data directory:     ", Style::default().fg(Color::Cyan)),
            Span::raw(ctx.data_dir.to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter students once, then mark attendance for any date.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let info_panel = Paragraph::new(info).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Roster ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(info_panel, columns[1]);

    render_status_bar(frame, layout.status, ctx.status);
    render_help_bar(
        frame,
        layout.help,
        &[("j/k", "Move"), ("Enter", "Open"), ("?", "Help"), ("q", "Quit")],
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(home: &mut HomeComponent, code: KeyCode) -> Option<Action> {
        home.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut home = HomeComponent::new();
        assert_eq!(home.selected_item(), MenuItem::AddStudents);

        home.update(Action::PrevItem).unwrap();
        assert_eq!(home.selected_item(), MenuItem::ResetStudents);

        home.update(Action::NextItem).unwrap();
        assert_eq!(home.selected_item(), MenuItem::AddStudents);
    }

    #[test]
    fn test_enter_opens_selected_entry() {
        let mut home = HomeComponent::new();
        home.update(Action::NextItem).unwrap();
        assert_eq!(press(&mut home, KeyCode::Enter), Some(Action::OpenAttendance));
    }

    #[test]
    fn test_hotkeys() {
        let mut home = HomeComponent::new();
        assert_eq!(press(&mut home, KeyCode::Char('1')), Some(Action::OpenAddStudents));
        assert_eq!(press(&mut home, KeyCode::Char('m')), Some(Action::OpenAttendance));
        assert_eq!(press(&mut home, KeyCode::Char('r')), Some(Action::OpenResetConfirm));
        assert_eq!(press(&mut home, KeyCode::Char('q')), Some(Action::OpenQuitDialog));
    }
}
