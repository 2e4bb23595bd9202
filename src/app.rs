//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that routes key events to the active screen or modal and applies Actions to
//! the domain state. Validation, storage and export live in the services.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_add_students_screen, draw_attendance_screen, draw_home_screen, AddStudentsComponent,
    AddStudentsRenderContext, AttendanceComponent, AttendanceRenderContext, ConfirmDialog,
    HelpDialog, HomeComponent, HomeRenderContext,
};
use crate::config::Config;
use crate::error::{EnrollError, ExportError, SheetError};
use crate::model::domain::DomainState;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{NewStudent, StatusLine, View};
use crate::services::{sheet_builder, JsonFileStore, RosterStore};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use tracing::{debug, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Screen currently shown
    pub view: View,

    /// Domain state (roster, sheet and their store)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Transient notification for the status bar
    pub status: Option<StatusLine>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub add_students: AddStudentsComponent,
    pub attendance: AttendanceComponent,
    pub confirm_dialog: ConfirmDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create an App backed by `students.json` in the configured data directory
    pub fn new(config: Config) -> App {
        let store = JsonFileStore::new(&config.data_dir);
        Self::with_store(config, Box::new(store))
    }

    pub fn with_store(config: Config, store: Box<dyn RosterStore>) -> App {
        App {
            view: View::Home,
            domain: DomainState::new(store),
            modals: ModalStack::new(),
            config,
            should_quit: false,
            status: None,
            home: HomeComponent::new(),
            add_students: AddStudentsComponent::new(),
            attendance: AttendanceComponent::new(),
            confirm_dialog: ConfirmDialog::quit(),
            help_dialog: HelpDialog::default(),
        }
    }

    fn sheet_len(&self) -> usize {
        self.domain.sheet.as_ref().map_or(0, |s| s.students.len())
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.home.init()?;
        self.add_students.init()?;
        self.attendance.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        match self.view {
            View::Home => self.home.handle_key_event(key),
            View::AddStudents => self.add_students.handle_key_event(key),
            View::Attendance => self.attendance.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, view = self.view.title(), "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.status.as_ref().is_some_and(|s| s.is_expired()) {
                    self.status = None;
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Screens
            // ─────────────────────────────────────────────────────────────────
            Action::GoHome => {
                self.view = View::Home;
            }
            Action::OpenAddStudents => {
                self.domain.refresh_roster();
                self.view = View::AddStudents;
            }
            Action::OpenAttendance => {
                self.domain.rebuild_sheet();
                self.attendance.select_first(self.sheet_len());
                self.view = View::Attendance;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to the active screen)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem => {
                self.navigate(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.confirm_dialog = ConfirmDialog::quit();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenResetConfirm => {
                self.confirm_dialog = ConfirmDialog::reset();
                self.modals.push(Modal::ResetConfirm);
            }
            Action::OpenRemoveConfirm => {
                let last = self
                    .domain
                    .sheet
                    .as_ref()
                    .and_then(|s| s.students.last())
                    .map(|entry| entry.name.clone());
                match last {
                    Some(name) => {
                        self.confirm_dialog = ConfirmDialog::remove(&name);
                        self.modals.push(Modal::RemoveConfirm { name });
                    }
                    None => {
                        self.status = Some(StatusLine::warning(
                            SheetError::NothingToRemove.to_string(),
                        ));
                    }
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(modal) = self.modals.pop() {
                    match modal {
                        Modal::QuitConfirm => self.should_quit = true,
                        Modal::ResetConfirm => self.reset_roster(),
                        Modal::RemoveConfirm { .. } => self.remove_most_recent(),
                        Modal::Help => {}
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Roster
            // ─────────────────────────────────────────────────────────────────
            Action::AddStudent(candidate) => self.add_student(candidate),

            // ─────────────────────────────────────────────────────────────────
            // Attendance Sheet
            // ─────────────────────────────────────────────────────────────────
            Action::SetStatus(status) => {
                let selected = self
                    .domain
                    .sheet
                    .as_ref()
                    .and_then(|sheet| self.attendance.selected_id(sheet));
                if let Some(id) = selected {
                    self.domain.mark(id, status);
                    self.attendance.advance(self.sheet_len());
                }
            }
            Action::PrevDay => {
                if let Some(date) = self.domain.date.pred_opt() {
                    self.change_date(date);
                }
            }
            Action::NextDay => {
                if let Some(date) = self.domain.date.succ_opt() {
                    self.change_date(date);
                }
            }
            Action::Today => self.change_date(sheet_builder::today()),
            Action::ExportSheet => self.export_sheet(),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.view {
            View::Home => {
                let data_dir = self.config.data_dir.display().to_string();
                let ctx = HomeRenderContext {
                    roster_len: self.domain.roster.len(),
                    data_dir: &data_dir,
                    status: self.status.as_ref(),
                };
                draw_home_screen(frame, area, &mut self.home, &ctx)?;
            }
            View::AddStudents => {
                let ctx = AddStudentsRenderContext {
                    roster: &self.domain.roster,
                    status: self.status.as_ref(),
                };
                draw_add_students_screen(frame, area, &self.add_students, &ctx)?;
            }
            View::Attendance => {
                let export_dir = self.config.export_dir.display().to_string();
                let ctx = AttendanceRenderContext {
                    sheet: self.domain.sheet.as_ref(),
                    export_dir: &export_dir,
                    export_format: self.config.export_format,
                    status: self.status.as_ref(),
                };
                draw_attendance_screen(frame, area, &mut self.attendance, &ctx)?;
            }
        }

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm | Modal::ResetConfirm | Modal::RemoveConfirm { .. } => {
                self.confirm_dialog.handle_key_event(key)
            }
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm | Modal::ResetConfirm | Modal::RemoveConfirm { .. } => {
                self.confirm_dialog.draw(frame, area)?
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    fn navigate(&mut self, action: Action) -> Result<()> {
        let len = self.sheet_len();
        match self.view {
            View::Home => {
                self.home.update(action)?;
            }
            View::Attendance => match action {
                Action::NextItem => self.attendance.next(len),
                Action::PrevItem => self.attendance.previous(len),
                Action::FirstItem => self.attendance.select_first(len),
                Action::LastItem => self.attendance.select_last(len),
                _ => {}
            },
            View::AddStudents => {}
        }
        Ok(())
    }

    fn add_student(&mut self, candidate: NewStudent) {
        match self.domain.add_student(candidate) {
            Ok(_) => {
                self.add_students.clear_form();
                self.status = Some(StatusLine::success("Student added successfully"));
            }
            Err(EnrollError::Validation(e)) => {
                self.status = Some(StatusLine::warning(e.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "failed to add student");
                self.status = Some(StatusLine::error(e.to_string()));
            }
        }
    }

    fn change_date(&mut self, date: NaiveDate) {
        self.domain.set_date(date);
        self.attendance.clamp(self.sheet_len());
    }

    fn remove_most_recent(&mut self) {
        match self.domain.remove_most_recent() {
            Ok(removal) => {
                self.attendance.clamp(removal.sheet.students.len());
                self.status = Some(StatusLine::success(format!(
                    "Removed {} ({})",
                    removal.removed.name, removal.removed.ag_number
                )));
            }
            Err(SheetError::NothingToRemove) => {
                self.status = Some(StatusLine::warning(SheetError::NothingToRemove.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "failed to remove student");
                self.status = Some(StatusLine::error(e.to_string()));
            }
        }
    }

    fn reset_roster(&mut self) {
        match self.domain.reset_roster() {
            Ok(()) => {
                self.attendance.clamp(0);
                self.status = Some(StatusLine::success("Student data has been reset"));
            }
            Err(e) => {
                warn!(error = %e, "failed to reset roster");
                self.status = Some(StatusLine::error(e.to_string()));
            }
        }
    }

    fn export_sheet(&mut self) {
        match self
            .domain
            .export(self.config.export_format, &self.config.export_dir)
        {
            Ok(path) => {
                self.status = Some(StatusLine::success(format!(
                    "Attendance sheet downloaded successfully: {}",
                    path.display()
                )));
            }
            Err(ExportError::EmptySheet) => {
                self.status = Some(StatusLine::warning(ExportError::EmptySheet.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.status = Some(StatusLine::error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceStatus, Notice};
    use crate::services::store::MemoryStore;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let mut app = App::with_store(Config::rooted_at(dir.path()), Box::new(MemoryStore::new()));
        app.domain.date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        app
    }

    fn run(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
        {
            run(app, action);
        }
    }

    fn add(app: &mut App, name: &str, ag: &str) {
        run(app, Action::AddStudent(NewStudent::new(name, ag)));
    }

    fn status_text(app: &App) -> &str {
        app.status.as_ref().map(|s| s.text.as_str()).unwrap_or("")
    }

    #[test]
    fn test_add_student_success_clears_form() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::OpenAddStudents);
        app.add_students.name = "Alice".to_string();
        app.add_students.ag_number = "2022-ag-0001".to_string();

        press(&mut app, KeyCode::Enter);

        assert_eq!(status_text(&app), "Student added successfully");
        assert!(app.add_students.name.is_empty());
        assert_eq!(app.domain.roster.len(), 1);
    }

    #[test]
    fn test_invalid_student_keeps_form() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::OpenAddStudents);
        app.add_students.name = "Bob".to_string();
        app.add_students.ag_number = "2022-AG-0001".to_string();

        press(&mut app, KeyCode::Enter);

        assert_eq!(status_text(&app), "AG Number must be in the format YYYY-ag-XXXX");
        assert_eq!(app.status.as_ref().unwrap().notice, Notice::Warning);
        assert_eq!(app.add_students.name, "Bob");
        assert!(app.domain.roster.is_empty());
    }

    #[test]
    fn test_mark_advances_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add(&mut app, "Alice", "2022-ag-0001");
        add(&mut app, "Bob", "2022-ag-0002");
        run(&mut app, Action::OpenAttendance);

        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('a'));

        let sheet = app.domain.sheet.as_ref().unwrap();
        assert_eq!(sheet.students[0].status, AttendanceStatus::Present);
        assert_eq!(sheet.students[1].status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_changing_date_clears_marks() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add(&mut app, "Alice", "2022-ag-0001");
        run(&mut app, Action::OpenAttendance);
        press(&mut app, KeyCode::Char('p'));

        press(&mut app, KeyCode::Char(']'));

        let sheet = app.domain.sheet.as_ref().unwrap();
        assert_eq!(sheet.date_label(), "2024-01-16");
        assert_eq!(sheet.students[0].status, AttendanceStatus::Unmarked);
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add(&mut app, "Alice", "2022-ag-0001");
        add(&mut app, "Bob", "2022-ag-0002");
        run(&mut app, Action::OpenAttendance);

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(
            app.modals.top(),
            Some(&Modal::RemoveConfirm {
                name: "Bob".to_string()
            })
        );

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.sheet_len(), 2);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.sheet_len(), 1);
        assert_eq!(app.domain.roster.len(), 1);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_remove_on_empty_sheet_warns() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::OpenAttendance);

        press(&mut app, KeyCode::Char('x'));

        assert!(app.modals.is_empty());
        assert_eq!(status_text(&app), "No students to remove");
    }

    #[test]
    fn test_export_writes_to_export_dir() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add(&mut app, "Alice", "2022-ag-0001");
        run(&mut app, Action::OpenAttendance);

        press(&mut app, KeyCode::Char('s'));

        assert!(status_text(&app).starts_with("Attendance sheet downloaded successfully"));
        assert!(dir.path().join("exports").join("Attendance_2024-01-15.html").exists());
    }

    #[test]
    fn test_export_empty_sheet_warns() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::OpenAttendance);

        press(&mut app, KeyCode::Char('s'));

        assert_eq!(status_text(&app), "No students to download");
        assert!(!dir.path().join("exports").exists());
    }

    #[test]
    fn test_reset_from_home() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add(&mut app, "Alice", "2022-ag-0001");

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.modals.top(), Some(&Modal::ResetConfirm));
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(status_text(&app), "Student data has been reset");
        assert!(app.domain.roster.is_empty());
        assert!(app.domain.store.load().is_empty());
    }

    #[test]
    fn test_quit_paths() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);

        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
        run(&mut app, Action::ForceQuit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_q_in_form_does_not_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, Action::OpenAddStudents);

        press(&mut app, KeyCode::Char('q'));

        assert!(app.modals.is_empty());
        assert_eq!(app.add_students.name, "q");
    }
}
