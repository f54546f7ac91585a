mod handlers;
mod status;
mod store;

pub use status::InvitationStatus;
pub use store::{InvitationStore, StatusChange};

use axum::Router;
use axum::routing::{get, put};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::gatherings::Gathering;
use crate::members::Member;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_invitations).post(handlers::create_invitation),
        )
        .route("/{id}", get(handlers::get_invitation))
        .route("/{id}/accept", put(handlers::accept_invitation))
        .route("/{id}/reject", put(handlers::reject_invitation))
        .route("/{id}/cancel", put(handlers::cancel_invitation))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invitation {
    #[serde(default)]
    pub id: i64,
    #[serde(skip)]
    pub member_id: i64,
    #[serde(skip)]
    pub gathering_id: i64,
    #[serde(default)]
    pub status: InvitationStatus,
    #[serde(default)]
    #[sqlx(skip)]
    pub member: Member,
    #[serde(default)]
    #[sqlx(skip)]
    pub gathering: Gathering,
    #[serde(default)]
    pub created_at: String,
}

impl Invitation {
    pub fn validate(&self) -> AppResult<()> {
        if self.member.id <= 0 {
            return Err(AppError::validation("member is required"));
        }
        if self.gathering.id <= 0 {
            return Err(AppError::validation("gathering is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvitationQuery {
    pub ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::Invitation;

    #[test]
    fn validate_requires_positive_member_and_gathering_ids() {
        let mut invitation = Invitation::default();
        let err = invitation.validate().unwrap_err();
        assert_eq!(err.to_string(), "member is required");

        invitation.member.id = 2;
        let err = invitation.validate().unwrap_err();
        assert_eq!(err.to_string(), "gathering is required");

        invitation.gathering.id = 3;
        assert!(invitation.validate().is_ok());
    }
}
