//! Session authentication
//!
//! - Session token issue and validation (`jwt`)
//! - Session gate middleware and the `SessionUser` extractor (`middleware`)

pub mod jwt;
pub mod middleware;
