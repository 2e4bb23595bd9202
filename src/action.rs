//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::{AttendanceStatus, NewStudent};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Screens
    // ─────────────────────────────────────────────────────────────────────────
    /// Return to the home menu
    GoHome,
    /// Open the roster entry screen
    OpenAddStudents,
    /// Open the attendance screen, building a fresh sheet
    OpenAttendance,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Ask before deleting the stored roster
    OpenResetConfirm,
    /// Ask before removing the most recently added student
    OpenRemoveConfirm,
    CloseModal,
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Roster
    // ─────────────────────────────────────────────────────────────────────────
    /// Validate and append a student to the roster
    AddStudent(NewStudent),

    // ─────────────────────────────────────────────────────────────────────────
    // Attendance Sheet
    // ─────────────────────────────────────────────────────────────────────────
    /// Mark the selected student
    SetStatus(AttendanceStatus),
    /// Move the sheet date one day back
    PrevDay,
    /// Move the sheet date one day forward
    NextDay,
    /// Move the sheet date to today
    Today,
    /// Write the sheet to the export directory
    ExportSheet,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::GoHome => write!(f, "GoHome"),
            Action::OpenAddStudents => write!(f, "OpenAddStudents"),
            Action::OpenAttendance => write!(f, "OpenAttendance"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenResetConfirm => write!(f, "OpenResetConfirm"),
            Action::OpenRemoveConfirm => write!(f, "OpenRemoveConfirm"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::AddStudent(s) => write!(f, "AddStudent({}, {})", s.name, s.ag_number),
            Action::SetStatus(status) => write!(f, "SetStatus({})", status),
            Action::PrevDay => write!(f, "PrevDay"),
            Action::NextDay => write!(f, "NextDay"),
            Action::Today => write!(f, "Today"),
            Action::ExportSheet => write!(f, "ExportSheet"),
        }
    }
}
