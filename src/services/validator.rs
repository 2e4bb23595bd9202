//! Roster entry validation

use crate::error::ValidationError;
use crate::model::NewStudent;
use regex::Regex;
use std::sync::LazyLock;

/// AG numbers look like `2022-ag-7693`
static AG_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-ag-[0-9]{4}$").unwrap()
});

/// Check a candidate before it is admitted into the roster
///
/// Duplicate names or AG numbers are accepted.
pub fn validate(candidate: &NewStudent) -> Result<(), ValidationError> {
    if candidate.name.is_empty() || candidate.ag_number.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    if !is_ag_number(&candidate.ag_number) {
        return Err(ValidationError::BadAgFormat);
    }

    Ok(())
}

pub fn is_ag_number(value: &str) -> bool {
    AG_NUMBER_REGEX.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_candidates_pass() {
        for ag in ["2022-ag-0001", "2022-ag-7693", "1999-ag-9999", "0000-ag-0000"] {
            assert_eq!(validate(&NewStudent::new("Alice", ag)), Ok(()), "{}", ag);
        }
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert_eq!(
            validate(&NewStudent::new("", "2022-ag-0001")),
            Err(ValidationError::EmptyField)
        );
        assert_eq!(
            validate(&NewStudent::new("Alice", "")),
            Err(ValidationError::EmptyField)
        );
        assert_eq!(
            validate(&NewStudent::default()),
            Err(ValidationError::EmptyField)
        );
    }

    #[test]
    fn test_bad_ag_numbers_rejected() {
        let bad = [
            "22-ag-0001",
            "2022-AG-0001",
            "2022-ag-001",
            "2022-ag-00011",
            " 2022-ag-0001",
            "2022-ag-0001 ",
            "2022-ag-0001\n",
            "2022_ag_0001",
            "abcd-ag-0001",
            "٢٠٢٢-ag-0001",
        ];
        for ag in bad {
            assert_eq!(
                validate(&NewStudent::new("Alice", ag)),
                Err(ValidationError::BadAgFormat),
                "{:?}",
                ag
            );
        }
    }

    #[test]
    fn test_empty_name_reported_before_format() {
        assert_eq!(
            validate(&NewStudent::new("", "bogus")),
            Err(ValidationError::EmptyField)
        );
    }
}
