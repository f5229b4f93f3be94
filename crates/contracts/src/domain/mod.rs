pub mod a001_stage;
pub mod common;
