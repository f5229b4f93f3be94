//! Field descriptors of the stage record

use crate::shared::metadata::{FieldMetadata, FieldType, ValidationRules};

/// Maximum length (in characters) of free-text fields
pub const MAX_TEXT_LENGTH: usize = 50;

/// Exact length of a department code
pub const DEPT_CODE_LENGTH: usize = 2;

/// Defaults to the creation time, so it is never missing once normalized
pub const DATE: FieldMetadata = FieldMetadata {
    name: "date",
    field_type: FieldType::DateTime,
    label: "Date of stage",
    validation: ValidationRules::required(),
};

pub const PLACE: FieldMetadata = FieldMetadata {
    name: "place",
    field_type: FieldType::Text,
    label: "Location",
    validation: ValidationRules::required().length(1, MAX_TEXT_LENGTH),
};

pub const STAGE_NAME: FieldMetadata = FieldMetadata {
    name: "stageName",
    field_type: FieldType::Text,
    label: "Name of stage",
    validation: ValidationRules::required().length(1, MAX_TEXT_LENGTH),
};

pub const COST: FieldMetadata = FieldMetadata {
    name: "cost",
    field_type: FieldType::Number,
    label: "Cost in Euro",
    validation: ValidationRules::required().at_least(0.0),
};

pub const DEPT: FieldMetadata = FieldMetadata {
    name: "dept",
    field_type: FieldType::Text,
    label: "Dept code",
    validation: ValidationRules::required().length(DEPT_CODE_LENGTH, DEPT_CODE_LENGTH),
};

/// All fields in wire order
pub const STAGE_FIELDS: &[FieldMetadata] = &[DATE, PLACE, STAGE_NAME, COST, DEPT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_required() {
        assert!(STAGE_FIELDS.iter().all(|f| !f.is_optional()));
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<_> = STAGE_FIELDS.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), STAGE_FIELDS.len());
    }
}
