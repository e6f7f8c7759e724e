//! User API handlers
//!
//! One handler per route. Each extracts typed input, makes a single call on
//! the [`UserStore`], and writes the outcome as an [`Envelope`]. Store
//! failures are answered locally, except in `me`, which hands them to the
//! `ApiError` responder.

use actix_web::{web, HttpResponse};

use crate::auth::middleware::SessionUser;
use crate::types::ApiError;
use crate::user::{
    dto::{CreateUserRequest, FindQuery, UpdatePasswordRequest},
    error::UserError,
    models::{UserField, UserProfile},
    repository::UserStore,
};
use crate::utils::response_handler::{empty_data, Envelope};

type Store = web::Data<dyn UserStore>;

/// Envelope for a store failure, written with `status`
fn store_failure(status: u16, err: &UserError) -> HttpResponse {
    Envelope::build(
        status,
        Some(err.to_string()),
        empty_data(),
        serde_json::to_value(err.to_response()).ok(),
    )
    .into_response()
}

fn success<T: serde::Serialize>(status: u16, message: Option<&str>, data: T) -> HttpResponse {
    Envelope::build(status, message.map(str::to_string), data, None).into_response()
}

/// GET /me
///
/// Returns the profile of the session's user.
pub async fn me(session: SessionUser, store: Store) -> Result<HttpResponse, ApiError> {
    let users = store.find_by_id(session.id).await?;
    if users.len() > 1 {
        log::warn!("{} records share user_id {}; using the first", users.len(), session.id);
    }

    let user = users.into_iter().next().ok_or(UserError::UserNotFound)?;
    Ok(success(200, Some("User Found"), UserProfile::from(user)))
}

/// GET /
pub async fn list_users(_session: SessionUser, store: Store) -> HttpResponse {
    match store.find_all().await {
        Ok(users) => success(200, Some("success"), users),
        Err(err) => {
            log::warn!("listing users failed: {err}");
            store_failure(err.status(), &err)
        },
    }
}

/// GET /{id}
pub async fn get_user(_session: SessionUser, store: Store, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();

    match store.find_by_id(id).await {
        Ok(users) => success(200, Some("success"), users),
        Err(err) => {
            log::warn!("lookup of user {id} failed: {err}");
            store_failure(err.status(), &err)
        },
    }
}

/// GET /find/{field}?value=
pub async fn find_users(
    _session: SessionUser,
    store: Store,
    path: web::Path<String>,
    query: web::Query<FindQuery>,
) -> Result<HttpResponse, ApiError> {
    let field: UserField = path.into_inner().parse().map_err(ApiError::BadRequest)?;

    let response = match store.find(field, &query.value).await {
        Ok(users) => success(200, Some("success"), users),
        Err(err) => {
            log::warn!("search on {field} failed: {err}");
            store_failure(err.status(), &err)
        },
    };
    Ok(response)
}

/// POST /
///
/// Open route: registration does not require a session.
pub async fn create_user(
    store: Store,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let response = match store.create(request.into()).await {
        Ok(user) => success(201, None, user),
        Err(err) => {
            log::warn!("user creation failed: {err}");
            store_failure(err.status(), &err)
        },
    };
    Ok(response)
}

/// PATCH /{id}
///
/// Any store failure is reported as 500.
pub async fn update_password(
    _session: SessionUser,
    store: Store,
    path: web::Path<i64>,
    body: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let request = body.into_inner();
    request.validate()?;

    let response = match store.find_by_id_and_update(id, request.into()).await {
        Ok(user) => success(202, Some("updated successful"), user),
        Err(err) => {
            log::warn!("password update for user {id} failed: {err}");
            store_failure(500, &err)
        },
    };
    Ok(response)
}

/// DELETE /{id}
///
/// Any store failure is reported as 500.
pub async fn delete_user(_session: SessionUser, store: Store, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();

    match store.find_by_id_and_delete(id).await {
        Ok(user) => success(200, Some("Delete Successful"), user),
        Err(err) => {
            log::error!("deleting user {id} failed: {err:?}");
            store_failure(500, &err)
        },
    }
}
