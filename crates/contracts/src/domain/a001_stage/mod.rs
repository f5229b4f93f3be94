pub mod aggregate;
pub mod metadata;
