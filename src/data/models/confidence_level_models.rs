use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::api_models::not_blank;
use crate::schema::confidence_levels;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = confidence_levels)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConfidenceLevel {
    pub id: i32,
    pub description: String,
    pub interval_days: i32,
    pub is_default: bool,
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = confidence_levels)]
pub struct NewConfidenceLevel<'a> {
    pub description: &'a str,
    pub interval_days: i32,
    pub is_default: bool,
    pub user_id: i32,
}

/// Body of both POST and PUT: a level is always replaced as a whole.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfidenceLevelForm {
    #[validate(
        length(min = 1, max = 100, message = "Description must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub description: String,
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365 days"))]
    pub interval_days: i32,
    #[serde(default)]
    pub is_default: bool,
}

/// Levels every new account starts with; the first one is the default.
pub const STARTER_LEVELS: [(&str, i32); 3] = [("Low", 1), ("Medium", 3), ("High", 7)];

#[cfg(test)]
mod tests {
    use super::*;

    fn form(description: &str, interval_days: i32) -> ConfidenceLevelForm {
        ConfidenceLevelForm {
            description: description.to_string(),
            interval_days,
            is_default: false,
        }
    }

    #[test]
    fn interval_bounds_are_inclusive() {
        assert!(form("Shaky", 1).validate().is_ok());
        assert!(form("Solid", 365).validate().is_ok());
        assert!(form("Never", 0).validate().is_err());
        assert!(form("Someday", 366).validate().is_err());
    }

    #[test]
    fn description_must_have_content() {
        let errors = form("   ", 3).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
        assert!(form("", 3).validate().is_err());
    }

    #[test]
    fn is_default_is_optional_in_json() {
        let parsed: ConfidenceLevelForm =
            serde_json::from_str(r#"{"description": "Medium", "interval_days": 3}"#).unwrap();
        assert!(!parsed.is_default);
    }
}
