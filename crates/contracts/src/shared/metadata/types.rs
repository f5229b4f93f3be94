//! Core metadata types for record fields
//!
//! All types use 'static lifetimes for zero-cost compile-time constants.

use super::validation::ValidationRules;

/// Category of a primitive field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    Number,
    DateTime,
}

/// Metadata for a single field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetadata {
    /// Name as it appears on the wire (JSON)
    pub name: &'static str,
    pub field_type: FieldType,
    pub label: &'static str,
    pub validation: ValidationRules,
}

impl FieldMetadata {
    /// Check if field is optional
    pub fn is_optional(&self) -> bool {
        !self.validation.is_required()
    }
}
