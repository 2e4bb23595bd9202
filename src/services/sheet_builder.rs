//! Derives the dated attendance sheet from the roster

use super::store::RosterStore;
use crate::model::{Sheet, SheetEntry};
use chrono::{NaiveDate, Utc};
use tracing::debug;

/// Build a fresh sheet for `date`, every student unmarked
pub fn build(store: &dyn RosterStore, date: NaiveDate) -> Sheet {
    let students: Vec<SheetEntry> = store.load().iter().map(SheetEntry::from).collect();

    debug!(%date, count = students.len(), "sheet built");

    Sheet {
        id: Utc::now().timestamp_millis(),
        date,
        students,
    }
}

/// The default sheet date, taken from the UTC calendar
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
