//! The attendee roster: (member, gathering) pairs representing accepted
//! attendance. Written only by invitation transitions and gathering creation;
//! read back to reconstitute attendee lists.

use std::collections::HashMap;

use sqlx::sqlite::SqliteConnection;
use sqlx::SqlitePool;

use crate::db::id_list;
use crate::error::{AppError, AppResult};

/// Inserts a roster pair. The pair is unique, so a second accept for the same
/// member and gathering surfaces as a conflict instead of a duplicate row.
pub(crate) async fn add(
    conn: &mut SqliteConnection,
    member_id: i64,
    gathering_id: i64,
) -> AppResult<()> {
    sqlx::query("INSERT INTO attendees (member_id, gathering_id) VALUES (?, ?)")
        .bind(member_id)
        .bind(gathering_id)
        .execute(&mut *conn)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::conflict("the member has accepted the invitation")
            }
            err => err.into(),
        })?;
    Ok(())
}

/// Removes a roster pair. Removing an absent pair is a no-op.
pub(crate) async fn remove(
    conn: &mut SqliteConnection,
    member_id: i64,
    gathering_id: i64,
) -> AppResult<()> {
    sqlx::query("DELETE FROM attendees WHERE member_id = ? AND gathering_id = ?")
        .bind(member_id)
        .bind(gathering_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Maps gathering id to the member ids currently rostered for it. An empty
/// id set returns the whole relation.
pub(crate) async fn by_gathering(
    pool: &SqlitePool,
    gathering_ids: &[i64],
) -> AppResult<HashMap<i64, Vec<i64>>> {
    let mut sql = String::from("SELECT member_id, gathering_id FROM attendees");
    if !gathering_ids.is_empty() {
        sql.push_str(&format!(
            " WHERE gathering_id IN ({})",
            id_list(gathering_ids)
        ));
    }
    let rows: Vec<(i64, i64)> = sqlx::query_as(&sql).fetch_all(pool).await?;

    let mut rostered: HashMap<i64, Vec<i64>> = HashMap::new();
    for (member_id, gathering_id) in rows {
        rostered.entry(gathering_id).or_default().push(member_id);
    }
    Ok(rostered)
}
