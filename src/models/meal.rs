use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a meal name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// A logged meal with its calorie count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Database-assigned identifier. Immutable for the record's lifetime.
    pub id: i64,
    /// Display name, 1 to 100 characters.
    pub name: String,
    /// Calorie count, never negative.
    pub calories: i64,
    /// Date the meal was logged. Set once at creation, never updated.
    pub created_at: NaiveDate,
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} kcal", self.name, self.calories)
    }
}

/// Write input for a meal, before it has an id or a date.
///
/// Used by both create and update; `created_at` is owned by the
/// repository and never part of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDraft {
    pub name: String,
    pub calories: i64,
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field the message belongs to.
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl MealDraft {
    /// Surrounding whitespace in the name is stripped; the trimmed
    /// value is what gets validated and stored.
    pub fn new(name: impl Into<String>, calories: i64) -> Self {
        Self {
            name: name.into().trim().to_string(),
            calories,
        }
    }

    /// Check the field constraints, returning every violated field.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "This field is required."));
        } else if self.name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("Ensure this value has at most {} characters.", MAX_NAME_LEN),
            ));
        }

        if self.calories < 0 {
            errors.push(FieldError::new(
                "calories",
                "Ensure this value is greater than or equal to 0.",
            ));
        }

        errors
    }
}
