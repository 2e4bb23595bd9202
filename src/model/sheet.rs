//! Attendance sheet model
//!
//! A `Sheet` is a dated snapshot of the roster with a status per student.
//! It lives only in memory and is rebuilt from the roster whenever the date
//! changes.

use super::student::Student;
use chrono::NaiveDate;
use std::fmt;

/// Attendance mark for one student on one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttendanceStatus {
    #[default]
    Unmarked,
    Present,
    Absent,
    Leave,
}

impl AttendanceStatus {
    /// The statuses a user can pick, in display order
    pub fn marks() -> [AttendanceStatus; 3] {
        [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Leave,
        ]
    }

    /// Text shown in the sheet and in exports
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Unmarked => "Not marked",
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Leave => "Leave",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a sheet, holding copies of the student's fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub id: i64,
    pub name: String,
    pub ag_number: String,
    pub status: AttendanceStatus,
}

impl From<&Student> for SheetEntry {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            ag_number: student.ag_number.clone(),
            status: AttendanceStatus::Unmarked,
        }
    }
}

/// Per-status tallies for a sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetSummary {
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
    pub unmarked: usize,
}

impl fmt::Display for SheetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Present: {}  Absent: {}  Leave: {}  Not marked: {}",
            self.present, self.absent, self.leave, self.unmarked
        )
    }
}

/// The live attendance sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Creation timestamp in milliseconds
    pub id: i64,
    pub date: NaiveDate,
    pub students: Vec<SheetEntry>,
}

impl Sheet {
    /// Date in `YYYY-MM-DD` form
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    #[cfg(test)]
    pub fn entry(&self, student_id: i64) -> Option<&SheetEntry> {
        self.students.iter().find(|e| e.id == student_id)
    }

    pub fn summary(&self) -> SheetSummary {
        self.students
            .iter()
            .fold(SheetSummary::default(), |mut acc, entry| {
                match entry.status {
                    AttendanceStatus::Present => acc.present += 1,
                    AttendanceStatus::Absent => acc.absent += 1,
                    AttendanceStatus::Leave => acc.leave += 1,
                    AttendanceStatus::Unmarked => acc.unmarked += 1,
                }
                acc
            })
    }
}
