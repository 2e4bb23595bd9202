//! Mutations applied to the live sheet

use super::store::RosterStore;
use crate::error::SheetError;
use crate::model::{AttendanceStatus, Sheet, SheetEntry};
use tracing::info;

/// Result of removing the most recently added student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The sheet without its last entry
    pub sheet: Sheet,
    /// The entry that was dropped
    pub removed: SheetEntry,
    /// Length of the stored roster after the truncation
    pub roster_len: usize,
}

/// Set the status of the entry for `student_id`
///
/// Unknown ids leave the sheet unchanged.
pub fn set_status(mut sheet: Sheet, student_id: i64, status: AttendanceStatus) -> Sheet {
    if let Some(entry) = sheet.students.iter_mut().find(|e| e.id == student_id) {
        entry.status = status;
    }
    sheet
}

/// Drop the last entry from the sheet and the last student from the roster
///
/// This is destructive: the roster change is saved immediately. On a store
/// failure neither the roster nor `sheet` is changed.
pub fn remove_most_recent(sheet: &Sheet, store: &dyn RosterStore) -> Result<Removal, SheetError> {
    let Some(removed) = sheet.students.last().cloned() else {
        return Err(SheetError::NothingToRemove);
    };

    let mut roster = store.load();
    if roster.pop().is_some() {
        store.save(&roster)?;
    }

    let mut next = sheet.clone();
    next.students.pop();

    info!(id = removed.id, name = %removed.name, remaining = roster.len(), "removed most recent student");

    Ok(Removal {
        sheet: next,
        removed,
        roster_len: roster.len(),
    })
}
