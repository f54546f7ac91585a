mod handlers;
mod store;

pub use store::MemberStore;

use axum::Router;
use axum::routing::get;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_members).post(handlers::create_member))
        .route(
            "/{id}",
            get(handlers::get_member)
                .put(handlers::update_member)
                .delete(handlers::delete_member),
        )
}

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap();
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub discarded_at: String,
}

impl Member {
    pub fn validate(&self) -> AppResult<()> {
        if self.email.is_empty() {
            return Err(AppError::validation("email is required"));
        } else if !EMAIL_REGEX.is_match(&self.email) {
            return Err(AppError::validation("invalid email format"));
        }
        if self.first_name.is_empty() {
            return Err(AppError::validation("first name is required"));
        }
        Ok(())
    }
}

/// Read filter; an empty id set means no id condition at all.
#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    pub ids: Vec<i64>,
    pub include_discarded: bool,
}
