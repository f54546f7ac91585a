use sqlx::SqlitePool;

use super::{Gathering, GatheringQuery};
use crate::attendees;
use crate::db::id_list;
use crate::error::{AppError, AppResult};
use crate::members::Member;

#[derive(Clone)]
pub struct GatheringStore {
    pool: SqlitePool,
}

impl GatheringStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The gathering row and its initial attendee rows (the creator among
    /// them) land in one transaction.
    pub async fn create(&self, gathering: &Gathering) -> AppResult<Gathering> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO gatherings (creator, type, scheduled_at, name, location, created_at) \
             VALUES (?, ?, ?, ?, ?, datetime('now'))",
        )
        .bind(gathering.creator.id)
        .bind(gathering.kind)
        .bind(&gathering.scheduled_at)
        .bind(&gathering.name)
        .bind(&gathering.location)
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();

        for attendee in &gathering.attendees {
            attendees::add(&mut tx, attendee.id, id).await?;
        }
        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Two-step read: fetch the gathering rows, then the roster rows, and
    /// join them in memory. Attendees come back as bare member references.
    pub async fn get(&self, query: &GatheringQuery) -> AppResult<Vec<Gathering>> {
        let mut sql = String::from(
            "SELECT id, creator, type, scheduled_at, name, location, created_at, \
             COALESCE(discarded_at, '') AS discarded_at FROM gatherings",
        );
        let mut conditions = Vec::new();
        if !query.include_discarded {
            conditions.push("discarded_at IS NULL".to_owned());
        }
        if !query.ids.is_empty() {
            conditions.push(format!("id IN ({})", id_list(&query.ids)));
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        let mut gatherings: Vec<Gathering> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        let rostered = attendees::by_gathering(&self.pool, &query.ids).await?;
        for gathering in &mut gatherings {
            gathering.creator.id = gathering.creator_id;
            if let Some(member_ids) = rostered.get(&gathering.id) {
                gathering.attendees = member_ids
                    .iter()
                    .map(|id| Member {
                        id: *id,
                        ..Default::default()
                    })
                    .collect();
            }
        }
        Ok(gatherings)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Gathering> {
        let gatherings = self
            .get(&GatheringQuery {
                ids: vec![id],
                ..Default::default()
            })
            .await?;
        gatherings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("cannot find gathering"))
    }

    /// Only the mutable fields; the creator and the attendee set are never
    /// touched here.
    pub async fn update(&self, gathering: &Gathering) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "UPDATE gatherings SET type = ?, scheduled_at = ?, name = ?, location = ?, \
             updated_at = datetime('now') WHERE id = ?",
        )
        .bind(gathering.kind)
        .bind(&gathering.scheduled_at)
        .bind(&gathering.name)
        .bind(&gathering.location)
        .bind(gathering.id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE gatherings SET discarded_at = datetime('now') WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
