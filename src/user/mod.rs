//! User module
//!
//! Routes, handlers and the data-access boundary for user records.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
