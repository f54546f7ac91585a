mod handlers;
mod store;

pub use store::GatheringStore;

use axum::Router;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{AppError, AppResult};
use crate::members::Member;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_gatherings).post(handlers::create_gathering),
        )
        .route(
            "/{id}",
            get(handlers::get_gathering)
                .put(handlers::update_gathering)
                .delete(handlers::delete_gathering),
        )
}

const SCHEDULE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// PRIVATE unless explicitly PUBLIC; any other stored or submitted value
/// collapses to PRIVATE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(from = "i64", into = "i64")]
#[repr(i32)]
pub enum GatheringType {
    #[default]
    Private = 1,
    Public = 2,
}

impl From<i64> for GatheringType {
    fn from(value: i64) -> Self {
        match value {
            2 => Self::Public,
            _ => Self::Private,
        }
    }
}

impl From<GatheringType> for i64 {
    fn from(kind: GatheringType) -> Self {
        kind as i64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Gathering {
    #[serde(default)]
    pub id: i64,
    #[serde(skip)]
    #[sqlx(rename = "creator")]
    pub creator_id: i64,
    #[serde(default)]
    #[sqlx(skip)]
    pub creator: Member,
    #[serde(default, rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: GatheringType,
    #[serde(default)]
    pub scheduled_at: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    #[sqlx(skip)]
    pub attendees: Vec<Member>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub discarded_at: String,
}

impl Gathering {
    pub fn validate(&self) -> AppResult<()> {
        if self.creator.id <= 0 {
            return Err(AppError::validation("creator is required"));
        }
        if self.scheduled_at.is_empty() {
            return Err(AppError::validation("scheduled at is required"));
        } else if PrimitiveDateTime::parse(&self.scheduled_at, SCHEDULE_FORMAT).is_err() {
            return Err(AppError::validation(
                "invalid time format, please use (YYYY-MM-DD MM:SS) format",
            ));
        }
        if self.location.is_empty() {
            return Err(AppError::validation("location at is required"));
        }
        if self.name.is_empty() {
            return Err(AppError::validation("gathering name at is required"));
        }
        for attendee in &self.attendees {
            if attendee.id <= 0 {
                return Err(AppError::validation("attendee is required"));
            }
        }
        Ok(())
    }
}

/// Read filter; an empty id set means no id condition at all.
#[derive(Debug, Clone, Default)]
pub struct GatheringQuery {
    pub ids: Vec<i64>,
    pub include_discarded: bool,
}
