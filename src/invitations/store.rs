use sqlx::SqlitePool;

use super::status::InvitationStatus;
use super::{Invitation, InvitationQuery};
use crate::attendees;
use crate::db::id_list;
use crate::error::{AppError, AppResult};

/// One status transition: the new status plus the roster pair it affects.
#[derive(Debug, Clone, Copy)]
pub struct StatusChange {
    pub id: i64,
    pub member_id: i64,
    pub gathering_id: i64,
    pub status: InvitationStatus,
}

#[derive(Clone)]
pub struct InvitationStore {
    pool: SqlitePool,
}

impl InvitationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, invitation: &Invitation) -> AppResult<Invitation> {
        let result = sqlx::query(
            "INSERT INTO invitations (member_id, gathering_id, status, created_at) \
             VALUES (?, ?, ?, datetime('now'))",
        )
        .bind(invitation.member.id)
        .bind(invitation.gathering.id)
        .bind(invitation.status)
        .execute(&self.pool)
        .await?;
        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn get(&self, query: &InvitationQuery) -> AppResult<Vec<Invitation>> {
        let mut sql = String::from(
            "SELECT id, member_id, gathering_id, status, created_at FROM invitations",
        );
        if !query.ids.is_empty() {
            sql.push_str(&format!(" WHERE id IN ({})", id_list(&query.ids)));
        }
        let mut invitations: Vec<Invitation> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        for invitation in &mut invitations {
            invitation.member.id = invitation.member_id;
            invitation.gathering.id = invitation.gathering_id;
        }
        Ok(invitations)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Invitation> {
        let invitations = self.get(&InvitationQuery { ids: vec![id] }).await?;
        invitations
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("cannot find invitation"))
    }

    /// The atomic unit of the invitation lifecycle: the status write and the
    /// roster mutation commit together or not at all. Accepting inserts the
    /// roster pair (a duplicate surfaces as a conflict and rolls the status
    /// write back); rejecting or canceling removes it.
    pub async fn update_status(&self, change: &StatusChange) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE invitations SET status = ? WHERE id = ?")
            .bind(change.status)
            .bind(change.id)
            .execute(&mut *tx)
            .await?;

        match change.status {
            InvitationStatus::Accepted => {
                attendees::add(&mut tx, change.member_id, change.gathering_id).await?;
            }
            InvitationStatus::Rejected | InvitationStatus::Canceled => {
                attendees::remove(&mut tx, change.member_id, change.gathering_id).await?;
            }
            InvitationStatus::Created => {}
        }

        tx.commit().await?;
        Ok(())
    }
}
