//! UI Components
//!
//! Each screen and dialog encapsulates its own state, event handling, and rendering.
//! Components communicate through Actions rather than direct state mutation.

pub mod add_students;
pub mod attendance;
pub mod confirm_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod table;

pub use add_students::{draw_add_students_screen, AddStudentsComponent, AddStudentsRenderContext};
pub use attendance::{draw_attendance_screen, AttendanceComponent, AttendanceRenderContext};
pub use confirm_dialog::ConfirmDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::centered_popup;
