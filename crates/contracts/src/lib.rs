//! Wire types and field metadata shared by the stage manager backend.

pub mod domain;
pub mod shared;
