//! Stage Manager backend: REST CRUD over stage (training) records.

pub mod domain;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod shared;
pub mod system;
