//! Request Error Handler
//!
//! Rejections produced by actix extractors (bad JSON body, unparsable path
//! segment, missing query parameter) and unmatched routes are turned into
//! `ApiError` here, so they reach the client as the same envelope every
//! handler writes.

use crate::types::ApiError;
use actix_web::{web, HttpRequest, HttpResponse};

fn bad_input(kind: &str, err: impl std::fmt::Display, req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected {kind} on {} {}: {err}", req.method(), req.path());
    ApiError::BadRequest(format!("Invalid {kind}: {err}")).into()
}

/// JSON body extractor settings
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| bad_input("request body", err, req))
}

/// Path extractor settings
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| bad_input("path parameter", err, req))
}

/// Query string extractor settings
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| bad_input("query string", err, req))
}

/// Registers the extractor settings above on a service config
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(path_config()).app_data(query_config());
}

/// Fallback for requests no route matched
pub async fn route_not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
