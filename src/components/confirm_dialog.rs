//! Yes/no confirmation dialog
//!
//! Shared by quit, roster reset and remove-most-recent. The App decides what
//! a confirmation means from the modal on top of the stack.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Confirmation prompt
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    /// Label for the `y` key
    pub confirm_label: String,
    /// Border color; red for destructive prompts
    pub accent: Color,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::quit()
    }
}

impl ConfirmDialog {
    pub fn quit() -> Self {
        Self {
            title: " Quit? ".to_string(),
            message: "Are you sure you want to quit?".to_string(),
            confirm_label: "Yes, quit".to_string(),
            accent: Color::Yellow,
        }
    }

    pub fn reset() -> Self {
        Self {
            title: " Reset Student Data ".to_string(),
            message: "Delete every student from the roster? This cannot be undone.".to_string(),
            confirm_label: "Yes, reset".to_string(),
            accent: Color::Red,
        }
    }

    pub fn remove(name: &str) -> Self {
        Self {
            title: " Remove Student ".to_string(),
            message: format!(
                "Remove '{}' from the sheet and the roster? This cannot be undone.",
                name
            ),
            confirm_label: "Yes, remove".to_string(),
            accent: Color::Red,
        }
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 56, 8);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{}  ", self.confirm_label)),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("No, cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent))
                    .title(self.title.clone())
                    .title_style(
                        Style::default()
                            .fg(self.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut ConfirmDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_yes_confirms_and_no_closes() {
        let mut dialog = ConfirmDialog::reset();
        assert_eq!(press(&mut dialog, KeyCode::Char('y')), Some(Action::ConfirmModal));
        assert_eq!(press(&mut dialog, KeyCode::Char('n')), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
    }

    #[test]
    fn test_remove_prompt_names_student() {
        let dialog = ConfirmDialog::remove("Carol");
        assert!(dialog.message.contains("'Carol'"));
        assert_eq!(dialog.accent, Color::Red);
    }
}
