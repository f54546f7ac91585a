#![allow(dead_code)]

use gatherly::gatherings::{Gathering, GatheringStore};
use gatherly::members::{Member, MemberStore};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh in-memory database with the real migrations applied. A single
/// connection keeps every query on the same in-memory instance.
pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

pub async fn seed_member(pool: &SqlitePool, first_name: &str) -> Member {
    MemberStore::new(pool.clone())
        .create(&Member {
            first_name: first_name.to_owned(),
            email: format!("{first_name}@example.com"),
            ..Default::default()
        })
        .await
        .unwrap()
}

/// Creates a gathering the way the HTTP layer does: the creator is pushed
/// onto the attendee list before the store write.
pub async fn seed_gathering(pool: &SqlitePool, creator: &Member) -> Gathering {
    let mut gathering = Gathering {
        scheduled_at: "2024-05-01 18:00".to_owned(),
        name: "board games night".to_owned(),
        location: "community hall".to_owned(),
        ..Default::default()
    };
    gathering.creator = creator.clone();
    gathering.attendees.push(creator.clone());
    GatheringStore::new(pool.clone())
        .create(&gathering)
        .await
        .unwrap()
}

/// Member ids currently rostered for a gathering, in id order.
pub async fn roster(pool: &SqlitePool, gathering_id: i64) -> Vec<i64> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT member_id FROM attendees WHERE gathering_id = ? ORDER BY member_id")
            .bind(gathering_id)
            .fetch_all(pool)
            .await
            .unwrap();
    rows.into_iter().map(|(id,)| id).collect()
}
