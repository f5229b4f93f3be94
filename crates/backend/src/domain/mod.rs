pub mod a001_stage;
