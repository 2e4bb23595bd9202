//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Student` / `NewStudent` - Durable roster records and form candidates
//! - `Sheet` / `SheetEntry` - The live, dated attendance sheet
//! - `DomainState` - Roster store, id allocation and the live sheet
//! - `ModalStack` - Modal overlay management
//! - `View` - Which screen is showing

pub mod domain;
pub mod modal;
pub mod sheet;
pub mod student;
pub mod ui;

// Re-export commonly used types
pub use sheet::{AttendanceStatus, Sheet, SheetEntry};
pub use student::{IdAllocator, NewStudent, Student};
pub use ui::{Notice, StatusLine, View};
