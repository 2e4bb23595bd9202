//! Roster records
//!
//! `Student` is the only durable record in the application. It is serialized
//! as `{ "id": .., "name": .., "agNumber": .. }` inside the stored roster array.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A student admitted to the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Creation timestamp in milliseconds, unique within the roster
    pub id: i64,
    pub name: String,
    pub ag_number: String,
}

/// Candidate entry collected by the roster form, not yet validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub ag_number: String,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, ag_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ag_number: ag_number.into(),
        }
    }

    /// Turn a validated candidate into a roster record
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            ag_number: self.ag_number,
        }
    }
}

/// Hands out student ids
///
/// Ids are millisecond timestamps. When two students are added within the
/// same millisecond, or the clock steps backwards, the id is bumped past the
/// last one handed out. Once the id space above the roster is exhausted the
/// lowest positive id not used by the roster is reused.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    /// Start above every id already present in `roster`
    pub fn seeded(roster: &[Student]) -> Self {
        Self {
            last: roster.iter().map(|s| s.id).max().unwrap_or(0),
        }
    }

    /// Next id for a student joining `roster`
    pub fn next_id(&mut self, roster: &[Student]) -> i64 {
        self.next_at(Utc::now().timestamp_millis(), roster)
    }

    fn next_at(&mut self, now_millis: i64, roster: &[Student]) -> i64 {
        match self.last.checked_add(1) {
            Some(floor) => {
                let id = now_millis.max(floor);
                self.last = id;
                id
            }
            None => lowest_free_id(roster),
        }
    }
}

fn lowest_free_id(roster: &[Student]) -> i64 {
    let used: HashSet<i64> = roster.iter().map(|s| s.id).collect();
    (1..i64::MAX).find(|id| !used.contains(id)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_json_uses_ag_number_key() {
        let student = Student {
            id: 1705300000000,
            name: "Alice".to_string(),
            ag_number: "2022-ag-0001".to_string(),
        };

        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["agNumber"], "2022-ag-0001");
        assert_eq!(json["id"], 1705300000000_i64);
        assert!(json.get("ag_number").is_none());
    }

    #[test]
    fn test_student_ignores_unknown_fields() {
        let json = r#"{"id":3,"name":"Bob","agNumber":"2021-ag-1234","status":"Present"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.name, "Bob");
        assert_eq!(student.ag_number, "2021-ag-1234");
    }

    #[test]
    fn test_allocator_bumps_within_same_tick() {
        let mut ids = IdAllocator::default();
        let first = ids.next_at(1000, &[]);
        let second = ids.next_at(1000, &[]);
        let third = ids.next_at(999, &[]);

        assert_eq!(first, 1000);
        assert_eq!(second, 1001);
        assert_eq!(third, 1002);
    }

    #[test]
    fn test_allocator_seeded_past_existing_ids() {
        let roster = vec![
            NewStudent::new("A", "2022-ag-0001").into_student(50),
            NewStudent::new("B", "2022-ag-0002").into_student(90),
        ];
        let mut ids = IdAllocator::seeded(&roster);
        assert_eq!(ids.next_at(10, &roster), 91);
    }

    #[test]
    fn test_allocator_at_max_id_reuses_lowest_free() {
        let roster = vec![
            NewStudent::new("A", "2022-ag-0001").into_student(1),
            NewStudent::new("B", "2022-ag-0002").into_student(i64::MAX),
        ];
        let mut ids = IdAllocator::seeded(&roster);

        assert_eq!(ids.next_at(1000, &roster), 2);
        assert_eq!(ids.next_at(i64::MAX, &roster), 2);
    }
}
