//! Project field validation for PROJTRACK.
//!
//! Raw form input is parsed into a typed `ProjectInput` at the
//! boundary; handlers never see unvalidated fields. Unlike
//! registration, project validation reports every violated rule in
//! order so the whole form can be corrected in one pass.

use chrono::NaiveDate;

use crate::db::Phase;

/// Maximum title length.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum short description length.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Validated, typed project fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    /// Project title.
    pub title: String,
    /// Short description.
    pub short_description: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date, never earlier than the start date.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle phase.
    pub phase: Phase,
}

/// Validate raw project form fields.
///
/// Returns the typed input, or the full ordered list of violated-rule
/// messages. Inputs are trimmed first; an empty end date means "no end
/// date".
pub fn validate_project(
    title: &str,
    short_description: &str,
    start_date: &str,
    end_date: &str,
    phase: &str,
) -> Result<ProjectInput, Vec<String>> {
    let title = title.trim();
    let short_description = short_description.trim();
    let start_date = start_date.trim();
    let end_date = end_date.trim();
    let phase = phase.trim();

    let mut errors = Vec::new();

    if title.is_empty() || start_date.is_empty() || short_description.is_empty() || phase.is_empty()
    {
        errors.push("Please fill in all required fields.".to_string());
    }
    if title.len() > MAX_TITLE_LENGTH {
        errors.push("Title must be less than 255 characters.".to_string());
    }
    if short_description.len() > MAX_DESCRIPTION_LENGTH {
        errors.push("Description must be under 1000 characters.".to_string());
    }

    let parsed_start = if start_date.is_empty() {
        None
    } else {
        match start_date.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("Start date is not a valid date.".to_string());
                None
            }
        }
    };

    let parsed_end = if end_date.is_empty() {
        None
    } else {
        match end_date.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("End date is not a valid date.".to_string());
                None
            }
        }
    };

    if let (Some(start), Some(end)) = (parsed_start, parsed_end) {
        if end < start {
            errors.push("End date cannot be earlier than start date.".to_string());
        }
    }

    let parsed_phase = if phase.is_empty() {
        None
    } else {
        match phase.parse::<Phase>() {
            Ok(p) => Some(p),
            Err(_) => {
                errors.push("Please select a valid project phase.".to_string());
                None
            }
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All required pieces parsed if no errors were recorded
    Ok(ProjectInput {
        title: title.to_string(),
        short_description: short_description.to_string(),
        start_date: parsed_start.expect("start date parsed"),
        end_date: parsed_end,
        phase: parsed_phase.expect("phase parsed"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_project() {
        let input = validate_project(
            "Website",
            "A new website",
            "2024-03-01",
            "2024-06-01",
            "design",
        )
        .unwrap();

        assert_eq!(input.title, "Website");
        assert_eq!(input.start_date, "2024-03-01".parse::<NaiveDate>().unwrap());
        assert_eq!(
            input.end_date,
            Some("2024-06-01".parse::<NaiveDate>().unwrap())
        );
        assert_eq!(input.phase, Phase::Design);
    }

    #[test]
    fn test_end_date_optional() {
        let input =
            validate_project("Website", "A new website", "2024-03-01", "", "testing").unwrap();
        assert!(input.end_date.is_none());
        assert_eq!(input.phase, Phase::Testing);
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = validate_project("", "", "", "", "").unwrap_err();
        assert_eq!(errors, vec!["Please fill in all required fields."]);
    }

    #[test]
    fn test_title_too_long() {
        let title = "a".repeat(256);
        let errors =
            validate_project(&title, "desc", "2024-03-01", "", "design").unwrap_err();
        assert_eq!(errors, vec!["Title must be less than 255 characters."]);

        // Exactly 255 is accepted
        let title = "a".repeat(255);
        assert!(validate_project(&title, "desc", "2024-03-01", "", "design").is_ok());
    }

    #[test]
    fn test_description_too_long() {
        let description = "a".repeat(1001);
        let errors =
            validate_project("Website", &description, "2024-03-01", "", "design").unwrap_err();
        assert_eq!(errors, vec!["Description must be under 1000 characters."]);
    }

    #[test]
    fn test_end_before_start() {
        let errors =
            validate_project("Website", "desc", "2024-06-01", "2024-03-01", "design").unwrap_err();
        assert_eq!(errors, vec!["End date cannot be earlier than start date."]);
    }

    #[test]
    fn test_end_equal_to_start_is_ok() {
        assert!(
            validate_project("Website", "desc", "2024-03-01", "2024-03-01", "design").is_ok()
        );
    }

    #[test]
    fn test_unparseable_dates() {
        let errors =
            validate_project("Website", "desc", "not-a-date", "also-bad", "design").unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Start date is not a valid date.",
                "End date is not a valid date."
            ]
        );
    }

    #[test]
    fn test_unknown_phase() {
        let errors =
            validate_project("Website", "desc", "2024-03-01", "", "planning").unwrap_err();
        assert_eq!(errors, vec!["Please select a valid project phase."]);
    }

    #[test]
    fn test_multiple_errors_in_order() {
        let title = "a".repeat(256);
        let description = "b".repeat(1001);
        let errors =
            validate_project(&title, &description, "2024-06-01", "2024-01-01", "design")
                .unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Title must be less than 255 characters.",
                "Description must be under 1000 characters.",
                "End date cannot be earlier than start date."
            ]
        );
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let input = validate_project(
            "  Website  ",
            "  desc  ",
            " 2024-03-01 ",
            " ",
            " design ",
        )
        .unwrap();
        assert_eq!(input.title, "Website");
        assert_eq!(input.short_description, "desc");
        assert!(input.end_date.is_none());
    }
}
