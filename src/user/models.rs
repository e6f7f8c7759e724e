//! User domain models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stored user record
///
/// `password` holds the argon2 hash and `token` the value supplied at
/// creation. Neither ever leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub user_email: String,

    #[serde(skip_serializing, default)]
    pub password: String,

    pub color: Option<String>,

    #[serde(skip_serializing, default)]
    pub token: String,
}

/// Public view of the current user returned by `/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub user_email: String,
    pub color: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            user_email: user.user_email,
            color: user.color,
        }
    }
}

/// Fields accepted when creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_email: String,
    pub password: String,
    pub token: String,
}

/// Partial update applied by `find_by_id_and_update`
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub password: Option<String>,
}

/// Columns a user can be looked up by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    UserId,
    UserEmail,
    Color,
    Token,
}

impl UserField {
    pub fn column(&self) -> &'static str {
        match self {
            UserField::UserId => "user_id",
            UserField::UserEmail => "user_email",
            UserField::Color => "color",
            UserField::Token => "token",
        }
    }

    /// Whether `user` has `value` in this column
    ///
    /// Comparison is on the column's text form, the same way the SQL store
    /// casts to `text`.
    pub fn matches(&self, user: &User, value: &str) -> bool {
        match self {
            UserField::UserId => user.user_id.to_string() == value,
            UserField::UserEmail => user.user_email == value,
            UserField::Color => user.color.as_deref() == Some(value),
            UserField::Token => user.token == value,
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for UserField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_id" => Ok(UserField::UserId),
            "user_email" => Ok(UserField::UserEmail),
            "color" => Ok(UserField::Color),
            "token" => Ok(UserField::Token),
            other => Err(format!("Unknown lookup field: {other}")),
        }
    }
}
