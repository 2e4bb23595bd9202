//! Attendance core services
//!
//! This module contains the operations behind every screen:
//! - Roster persistence (`store`)
//! - Entry validation (`validator`)
//! - Enrollment and reset (`roster`)
//! - Sheet derivation (`sheet_builder`)
//! - Sheet editing (`sheet_editor`)
//! - Export rendering and writing (`exporter`)

pub mod exporter;
pub mod roster;
pub mod sheet_builder;
pub mod sheet_editor;
pub mod store;
pub mod validator;

pub use exporter::ExportFormat;
pub use sheet_editor::Removal;
pub use store::{JsonFileStore, RosterStore};
