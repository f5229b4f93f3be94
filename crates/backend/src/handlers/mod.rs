pub mod a001_stage;
pub mod api_docs;
