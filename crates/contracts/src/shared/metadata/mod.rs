//! Metadata types for describing record fields
//!
//! Field descriptors are compile-time constants. Each one carries the
//! [`ValidationRules`] that writes must satisfy, so validation is driven by
//! the descriptor rather than by ad-hoc checks.
//!
//! ## Usage
//!
//! ```rust
//! use contracts::domain::a001_stage::metadata::STAGE_FIELDS;
//!
//! for field in STAGE_FIELDS {
//!     println!("{}: {}", field.name, field.label);
//! }
//! ```

mod types;
mod validation;

pub use types::{FieldMetadata, FieldType};
pub use validation::{FieldViolation, ValidationError, ValidationRules, Violation};
