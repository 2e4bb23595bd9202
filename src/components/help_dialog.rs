//! Keyboard shortcut reference, opened with `?`

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SECTIONS: &[Section] = &[
    (
        "Home",
        &[
            ("j / ↓", "Next menu entry"),
            ("k / ↑", "Previous menu entry"),
            ("Enter", "Open selected entry"),
            ("1 / a", "Add students"),
            ("2 / m", "Mark attendance"),
            ("r", "Reset student data"),
        ],
    ),
    (
        "Add Students",
        &[
            ("Tab", "Switch between Name and AG Number"),
            ("Backspace", "Delete last character"),
            ("Enter", "Add student"),
            ("Esc", "Back to home"),
        ],
    ),
    (
        "Mark Attendance",
        &[
            ("j / k", "Select next / previous student"),
            ("g / G", "Jump to first / last student"),
            ("p", "Mark Present"),
            ("a", "Mark Absent"),
            ("l", "Mark Leave"),
            ("[ / ←", "Previous day (clears marks)"),
            ("] / →", "Next day (clears marks)"),
            ("t", "Today"),
            ("x / Del", "Remove most recently added student"),
            ("s", "Save sheet to the export directory"),
            ("Esc", "Back to home"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Show this help"),
            ("q", "Quit"),
            ("Ctrl+c", "Quit immediately"),
        ],
    ),
];

/// Scrollable shortcut list
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                return Ok(Some(Action::CloseModal))
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1)
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = help_lines();
        let total = lines.len();

        let dialog_area = centered_popup(area, 64, total as u16 + 2);
        frame.render_widget(Clear, dialog_area);

        let visible = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }

        Ok(())
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    for (title, shortcuts) in SECTIONS {
        lines.push(Line::from(Span::styled(
            format!(" {}", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:<12}", key), key_style),
                Span::raw(*description),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        " q, Esc or ? closes this window",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut HelpDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_close_keys() {
        let mut dialog = HelpDialog::default();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            assert_eq!(press(&mut dialog, code), Some(Action::CloseModal));
        }
    }

    #[test]
    fn test_scroll_never_underflows() {
        let mut dialog = HelpDialog::default();
        press(&mut dialog, KeyCode::Up);
        assert_eq!(dialog.scroll_offset, 0);

        press(&mut dialog, KeyCode::Char('j'));
        assert_eq!(dialog.scroll_offset, 1);
    }

    #[test]
    fn test_every_section_is_listed() {
        let text: Vec<String> = help_lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        for (title, _) in SECTIONS {
            assert!(text.iter().any(|l| l.trim() == *title));
        }
    }
}
