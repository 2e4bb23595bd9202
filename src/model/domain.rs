//! Domain state - business/data state separate from UI concerns

use super::sheet::{AttendanceStatus, Sheet};
use super::student::{IdAllocator, NewStudent, Student};
use crate::error::{EnrollError, ExportError, SheetError, StoreError};
use crate::services::exporter::{self, ExportFormat};
use crate::services::{roster, sheet_builder, sheet_editor, Removal, RosterStore};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Domain state containing all business data
pub struct DomainState {
    /// Durable roster backend
    pub store: Box<dyn RosterStore>,

    /// Id source for new students
    pub ids: IdAllocator,

    /// Roster as last read from the store, for display
    pub roster: Vec<Student>,

    /// Date of the attendance sheet
    pub date: NaiveDate,

    /// The live sheet, built when the attendance screen opens
    pub sheet: Option<Sheet>,
}

impl DomainState {
    /// Create domain state over `store`, dated today
    pub fn new(store: Box<dyn RosterStore>) -> Self {
        let roster = store.load();
        let ids = IdAllocator::seeded(&roster);
        Self {
            store,
            ids,
            roster,
            date: sheet_builder::today(),
            sheet: None,
        }
    }

    /// Re-read the roster from the store
    pub fn refresh_roster(&mut self) {
        self.roster = self.store.load();
    }

    /// Discard the live sheet and derive a new one for the current date
    pub fn rebuild_sheet(&mut self) {
        self.sheet = Some(sheet_builder::build(self.store.as_ref(), self.date));
    }

    /// Change the sheet date, rebuilding the sheet
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.rebuild_sheet();
    }

    pub fn add_student(&mut self, candidate: NewStudent) -> Result<Student, EnrollError> {
        let student = roster::enroll(self.store.as_ref(), &mut self.ids, candidate)?;
        self.refresh_roster();
        Ok(student)
    }

    pub fn mark(&mut self, student_id: i64, status: AttendanceStatus) {
        if let Some(sheet) = self.sheet.take() {
            self.sheet = Some(sheet_editor::set_status(sheet, student_id, status));
        }
    }

    pub fn remove_most_recent(&mut self) -> Result<Removal, SheetError> {
        let sheet = self.sheet.as_ref().ok_or(SheetError::NothingToRemove)?;
        let removal = sheet_editor::remove_most_recent(sheet, self.store.as_ref())?;
        self.sheet = Some(removal.sheet.clone());
        self.refresh_roster();
        Ok(removal)
    }

    pub fn export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf, ExportError> {
        let sheet = self.sheet.as_ref().ok_or(ExportError::EmptySheet)?;
        exporter::export(sheet, format, dir)
    }

    pub fn reset_roster(&mut self) -> Result<(), StoreError> {
        roster::reset(self.store.as_ref())?;
        self.roster.clear();
        self.sheet = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;
    use tempfile::TempDir;

    fn domain() -> DomainState {
        let mut domain = DomainState::new(Box::new(MemoryStore::new()));
        domain.date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        domain
    }

    fn add(domain: &mut DomainState, name: &str, ag: &str) -> Student {
        domain.add_student(NewStudent::new(name, ag)).unwrap()
    }

    #[test]
    fn test_new_seeds_ids_from_stored_roster() {
        let stored = vec![Student {
            id: i64::MAX - 10,
            name: "Old".to_string(),
            ag_number: "2020-ag-0001".to_string(),
        }];
        let mut domain = DomainState::new(Box::new(MemoryStore::with_students(&stored)));

        let student = add(&mut domain, "New", "2024-ag-0001");
        assert_eq!(student.id, i64::MAX - 9);
        assert_eq!(domain.roster.len(), 2);
    }

    #[test]
    fn test_add_after_max_id_roster_does_not_overflow() {
        let stored = r#"[{"id":9223372036854775807,"name":"Old","agNumber":"2020-ag-0001"}]"#;
        let mut domain = DomainState::new(Box::new(MemoryStore::with_raw(stored)));

        let student = add(&mut domain, "New", "2024-ag-0001");
        assert_eq!(student.id, 1);
        assert_eq!(domain.roster.len(), 2);
    }

    #[test]
    fn test_date_change_discards_marks() {
        let mut domain = domain();
        let alice = add(&mut domain, "Alice", "2022-ag-0001");
        domain.rebuild_sheet();
        domain.mark(alice.id, AttendanceStatus::Present);

        domain.set_date(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());

        let sheet = domain.sheet.as_ref().unwrap();
        assert_eq!(sheet.date_label(), "2024-01-16");
        assert_eq!(sheet.entry(alice.id).unwrap().status, AttendanceStatus::Unmarked);
    }

    #[test]
    fn test_mark_without_sheet_is_noop() {
        let mut domain = domain();
        domain.mark(1, AttendanceStatus::Absent);
        assert!(domain.sheet.is_none());
    }

    #[test]
    fn test_remove_most_recent_updates_both_views() {
        let mut domain = domain();
        add(&mut domain, "Alice", "2022-ag-0001");
        add(&mut domain, "Bob", "2022-ag-0002");
        add(&mut domain, "Carol", "2022-ag-0003");
        domain.rebuild_sheet();

        let removal = domain.remove_most_recent().unwrap();
        assert_eq!(removal.removed.name, "Carol");
        assert_eq!(domain.sheet.as_ref().unwrap().students.len(), 2);
        assert_eq!(domain.roster.len(), 2);
    }

    #[test]
    fn test_remove_without_sheet_is_nothing_to_remove() {
        let mut domain = domain();
        assert!(matches!(
            domain.remove_most_recent(),
            Err(SheetError::NothingToRemove)
        ));
    }

    #[test]
    fn test_export_without_sheet_is_empty_sheet() {
        let domain = domain();
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            domain.export(ExportFormat::Html, dir.path()),
            Err(ExportError::EmptySheet)
        ));
    }

    #[test]
    fn test_full_scenario() {
        let mut domain = domain();
        let alice = add(&mut domain, "Alice", "2022-ag-0001");
        domain.rebuild_sheet();
        domain.mark(alice.id, AttendanceStatus::Present);

        let dir = TempDir::new().unwrap();
        let path = domain.export(ExportFormat::Html, dir.path()).unwrap();

        assert!(path.ends_with("Attendance_2024-01-15.html"));
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("<tr><td>Alice</td><td>2022-ag-0001</td><td>Present</td></tr>"));
    }

    #[test]
    fn test_reset_clears_roster_and_sheet() {
        let mut domain = domain();
        add(&mut domain, "Alice", "2022-ag-0001");
        domain.rebuild_sheet();

        domain.reset_roster().unwrap();
        assert!(domain.roster.is_empty());
        assert!(domain.sheet.is_none());
        assert!(domain.store.load().is_empty());
    }
}
