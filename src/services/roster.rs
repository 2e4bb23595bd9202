//! Roster entry and reset operations

use super::store::RosterStore;
use super::validator;
use crate::error::{EnrollError, StoreError};
use crate::model::{IdAllocator, NewStudent, Student};
use tracing::info;

/// Validate `candidate` and append it to the stored roster
///
/// An unreadable roster is treated as empty, so the save replaces it.
pub fn enroll(
    store: &dyn RosterStore,
    ids: &mut IdAllocator,
    candidate: NewStudent,
) -> Result<Student, EnrollError> {
    validator::validate(&candidate)?;

    let mut students = store.load();
    let student = candidate.into_student(ids.next_id(&students));
    students.push(student.clone());
    store.save(&students)?;

    info!(id = student.id, ag_number = %student.ag_number, "student added");
    Ok(student)
}

/// Delete the stored roster
pub fn reset(store: &dyn RosterStore) -> Result<(), StoreError> {
    store.reset()?;
    info!("roster reset");
    Ok(())
}
