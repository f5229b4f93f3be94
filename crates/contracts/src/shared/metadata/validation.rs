//! Validation rules for metadata fields

use std::fmt;

use thiserror::Error;

use super::types::FieldMetadata;

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Text whose length (in characters) lies within `min..=max`
    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    /// Lower bound for numeric values (inclusive)
    pub const fn at_least(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate an optional string value against the rules.
    ///
    /// An empty string counts as missing for required fields.
    pub fn validate_string(&self, value: Option<&str>) -> Result<(), Violation> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ if self.required => return Err(Violation::Required),
            _ => return Ok(()),
        };

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(Violation::TooShort { min, actual: len });
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(Violation::TooLong { max, actual: len });
            }
        }

        Ok(())
    }

    /// Validate an optional numeric value against the lower bound
    pub fn validate_number(&self, value: Option<f64>) -> Result<(), Violation> {
        let value = match value {
            Some(v) => v,
            None if self.required => return Err(Violation::Required),
            None => return Ok(()),
        };

        if !value.is_finite() {
            return Err(Violation::NotFinite);
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(Violation::BelowMinimum { min, actual: value });
            }
        }

        Ok(())
    }

    /// Validate presence of a value that has no further constraints (e.g. dates)
    pub fn validate_presence<T>(&self, value: Option<&T>) -> Result<(), Violation> {
        if self.required && value.is_none() {
            return Err(Violation::Required);
        }
        Ok(())
    }
}

/// A single broken rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    Required,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    BelowMinimum { min: f64, actual: f64 },
    NotFinite,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::TooShort { min, actual } => {
                write!(f, "must be at least {min} characters long (got {actual})")
            }
            Self::TooLong { max, actual } => {
                write!(f, "must be at most {max} characters long (got {actual})")
            }
            Self::BelowMinimum { min, actual } => {
                write!(f, "must not be less than {min} (got {actual})")
            }
            Self::NotFinite => write!(f, "must be a finite number"),
        }
    }
}

/// A violated rule bound to the field it was found on
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub violation: Violation,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.violation)
    }
}

/// All rules a candidate record broke, in field order
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{entity} validation failed: {}", join_violations(.violations))]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            violations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn push(&mut self, field: &'static str, violation: Violation) {
        self.violations.push(FieldViolation { field, violation });
    }

    /// Checks a text value against the field rules.
    /// Returns the value only if it passed.
    pub fn text(&mut self, field: &FieldMetadata, value: Option<String>) -> Option<String> {
        match field.validation.validate_string(value.as_deref()) {
            Ok(()) => value,
            Err(violation) => {
                self.push(field.name, violation);
                None
            }
        }
    }

    /// Checks a numeric value against the field rules.
    /// Returns the value only if it passed.
    pub fn number(&mut self, field: &FieldMetadata, value: Option<f64>) -> Option<f64> {
        match field.validation.validate_number(value) {
            Ok(()) => value,
            Err(violation) => {
                self.push(field.name, violation);
                None
            }
        }
    }

    /// Checks presence of a value without further constraints.
    pub fn present<T>(&mut self, field: &FieldMetadata, value: Option<T>) -> Option<T> {
        match field.validation.validate_presence(value.as_ref()) {
            Ok(()) => value,
            Err(violation) => {
                self.push(field.name, violation);
                None
            }
        }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::FieldType;

    #[test]
    fn test_required_string() {
        let rules = ValidationRules::required();
        assert_eq!(rules.validate_string(None), Err(Violation::Required));
        assert_eq!(rules.validate_string(Some("")), Err(Violation::Required));
        assert_eq!(rules.validate_string(Some(" ")), Ok(()));
    }

    #[test]
    fn test_optional_string() {
        let rules = ValidationRules::none().length(2, 2);
        assert_eq!(rules.validate_string(None), Ok(()));
        assert_eq!(rules.validate_string(Some("")), Ok(()));
        assert_eq!(
            rules.validate_string(Some("A")),
            Err(Violation::TooShort { min: 2, actual: 1 })
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = ValidationRules::required().length(1, 3);
        assert_eq!(rules.validate_string(Some("été")), Ok(()));
        assert_eq!(
            rules.validate_string(Some("étés")),
            Err(Violation::TooLong { max: 3, actual: 4 })
        );
    }

    #[test]
    fn test_number_bounds() {
        let rules = ValidationRules::required().at_least(0.0);
        assert_eq!(rules.validate_number(Some(0.0)), Ok(()));
        assert_eq!(rules.validate_number(Some(150.5)), Ok(()));
        assert_eq!(rules.validate_number(Some(1.0e12)), Ok(()));
        assert_eq!(
            rules.validate_number(Some(-0.01)),
            Err(Violation::BelowMinimum {
                min: 0.0,
                actual: -0.01
            })
        );
        assert_eq!(rules.validate_number(None), Err(Violation::Required));
        assert_eq!(
            rules.validate_number(Some(f64::NAN)),
            Err(Violation::NotFinite)
        );
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(Violation::Required.to_string(), "is required");
        assert_eq!(
            Violation::TooLong { max: 50, actual: 51 }.to_string(),
            "must be at most 50 characters long (got 51)"
        );
        assert_eq!(
            Violation::BelowMinimum {
                min: 0.0,
                actual: -5.0
            }
            .to_string(),
            "must not be less than 0 (got -5)"
        );
    }

    #[test]
    fn test_validation_error_collects_in_order() {
        let place = FieldMetadata {
            name: "place",
            field_type: FieldType::Text,
            label: "Location",
            validation: ValidationRules::required().length(1, 50),
        };
        let cost = FieldMetadata {
            name: "cost",
            field_type: FieldType::Number,
            label: "Cost",
            validation: ValidationRules::required().at_least(0.0),
        };

        let mut errors = ValidationError::new("Stage");
        assert_eq!(errors.text(&place, None), None);
        assert_eq!(errors.number(&cost, Some(-1.0)), None);
        assert_eq!(errors.field_names(), vec!["place", "cost"]);
        assert_eq!(
            errors.to_string(),
            "Stage validation failed: place is required, cost must not be less than 0 (got -1)"
        );
    }

    #[test]
    fn test_validation_error_passes_valid_values() {
        let place = FieldMetadata {
            name: "place",
            field_type: FieldType::Text,
            label: "Location",
            validation: ValidationRules::required().length(1, 50),
        };

        let mut errors = ValidationError::new("Stage");
        assert_eq!(
            errors.text(&place, Some("Lyon".into())),
            Some("Lyon".to_string())
        );
        assert!(errors.is_empty());
    }
}
