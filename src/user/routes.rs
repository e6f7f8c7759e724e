//! User management routes
//!
//! Registration order matters: `/me` must come before `/{id}`, and the first
//! route registered for a path and method is the one that answers.

use crate::user::handlers;
use actix_web::{web, Scope};

/// Path the user routes are mounted under
pub const USERS_SCOPE: &str = "/users";

/// Configure user management routes
pub fn configure_user_routes() -> Scope {
    web::scope(USERS_SCOPE)
        // Current session's user
        .route("/me", web::get().to(handlers::me))
        // List all users
        .route("", web::get().to(handlers::list_users))
        .route("/", web::get().to(handlers::list_users))
        // Get user by ID
        .route("/{id}", web::get().to(handlers::get_user))
        // Find users by field value
        .route("/find/{field}", web::get().to(handlers::find_users))
        // Create a user (no session required)
        .route("", web::post().to(handlers::create_user))
        .route("/", web::post().to(handlers::create_user))
        // Update password
        .route("/{id}", web::patch().to(handlers::update_password))
        // Delete user
        .route("/{id}", web::delete().to(handlers::delete_user))
}
