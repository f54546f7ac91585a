use sqlx::SqlitePool;

use super::{Member, MemberQuery};
use crate::db::id_list;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct MemberStore {
    pool: SqlitePool,
}

impl MemberStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, member: &Member) -> AppResult<Member> {
        let result = sqlx::query(
            "INSERT INTO members (first_name, last_name, email, created_at) \
             VALUES (?, ?, ?, datetime('now'))",
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .execute(&self.pool)
        .await?;
        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn get(&self, query: &MemberQuery) -> AppResult<Vec<Member>> {
        let mut sql = String::from(
            "SELECT id, first_name, last_name, email, created_at, \
             COALESCE(discarded_at, '') AS discarded_at FROM members",
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

        Ok(sqlx::query_as(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Member> {
        let members = self
            .get(&MemberQuery {
                ids: vec![id],
                ..Default::default()
            })
            .await?;
        members
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("cannot find member"))
    }

    pub async fn update(&self, member: &Member) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "UPDATE members SET first_name = ?, last_name = ?, email = ?, \
             updated_at = datetime('now') WHERE id = ?",
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(member.id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE members SET discarded_at = datetime('now') WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
