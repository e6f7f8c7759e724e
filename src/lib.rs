//! User Routes Service
//!
//! CRUD routes over user records, built with Actix-web. Every response is a
//! uniform JSON envelope; persistence sits behind the `UserStore` trait and
//! identity is established by the session gate in `auth`.

pub mod auth;
pub mod config;
pub mod postgres;
pub mod types;
pub mod user;
pub mod utils;

use actix_cors::Cors;
use actix_web::web;
use std::sync::Arc;

use crate::types::AppConfig;
use crate::user::repository::UserStore;
use crate::user::routes::configure_user_routes;
use crate::utils::error_handler::{configure_extractors, route_not_found};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_NAME: &str = "user-routes";

/// Registers the store, extractor settings, user routes and 404 fallback
///
/// The session gate is middleware and has to be added on the `App` itself.
pub fn configure_app(store: Arc<dyn UserStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(store))
            .configure(configure_extractors)
            .service(configure_user_routes())
            .default_service(web::to(route_not_found));
    }
}

/// CORS policy for the configured origins
pub fn cors_from_config(config: &AppConfig) -> Cors {
    let origins = config.cors_origin_list();
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default().allow_any_method().allow_any_header(), |cors, origin| {
            cors.allowed_origin(origin)
        })
}
