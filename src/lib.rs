pub mod attendees;
pub mod config;
pub mod db;
pub mod enrich;
pub mod error;
pub mod gatherings;
pub mod invitations;
pub mod members;
pub mod response;

use axum::Router;
use axum::extract::FromRef;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub members: members::MemberStore,
    pub gatherings: gatherings::GatheringStore,
    pub invitations: invitations::InvitationStore,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            members: members::MemberStore::new(db_pool.clone()),
            gatherings: gatherings::GatheringStore::new(db_pool.clone()),
            invitations: invitations::InvitationStore::new(db_pool.clone()),
            db_pool,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/members", members::router())
        .nest("/gatherings", gatherings::router())
        .nest("/invitations", invitations::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
