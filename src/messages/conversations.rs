use axum::{
    Json, debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, models::Role, session};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LastMessage {
    pub content: String,
    pub created_at: i64,
    pub read: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Conversation {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub last_message: LastMessage,
    pub unread_count: i64,
}

// One row per counterparty: the latest message of each thread plus how
// many of their messages to us are still unread. Ties on created_at are
// broken by message id so the result is deterministic.
const CONVERSATIONS_SQL: &str = "\
WITH threads AS ( \
    SELECT m.id, m.content, m.created_at, m.read, \
           CASE WHEN m.sender_id = ?1 THEN m.receiver_id ELSE m.sender_id END AS other_user_id, \
           ROW_NUMBER() OVER ( \
               PARTITION BY CASE WHEN m.sender_id = ?1 THEN m.receiver_id ELSE m.sender_id END \
               ORDER BY m.created_at DESC, m.id DESC \
           ) AS rn \
    FROM messages m \
    WHERE m.sender_id = ?1 OR m.receiver_id = ?1 \
) \
SELECT t.other_user_id, u.name, u.role, t.content, t.created_at, t.read, \
       (SELECT COUNT(*) FROM messages m \
         WHERE m.sender_id = t.other_user_id AND m.receiver_id = ?1 AND m.read = 0) \
FROM threads t \
JOIN users u ON u.id = t.other_user_id \
WHERE t.rn = 1 \
ORDER BY t.created_at DESC, t.id DESC";

pub(crate) async fn list_conversations(
    db_pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Conversation>, sqlx::Error> {
    let rows: Vec<(String, String, Role, String, i64, bool, i64)> =
        sqlx::query_as(CONVERSATIONS_SQL)
            .bind(user_id)
            .fetch_all(db_pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, role, content, created_at, read, unread_count)| Conversation {
            id,
            name,
            role,
            last_message: LastMessage {
                content,
                created_at,
                read,
            },
            unread_count,
        })
        .collect())
}

#[debug_handler]
pub(crate) async fn conversations(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let user = session::current_user(&db_pool, &session).await?;
    let conversations = list_conversations(&db_pool, &user.id).await?;

    Ok(Json(json!({ "conversations": conversations })).into_response())
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::db;

    async fn pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::init(&pool).await.unwrap();
        pool
    }

    async fn user(pool: &SqlitePool, id: &str, name: &str, role: &str) {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, created_at) \
             VALUES (?1, ?2, ?1 || '@example.com', 'x', ?3, 0)",
        )
        .bind(id)
        .bind(name)
        .bind(role)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn message(pool: &SqlitePool, id: &str, from: &str, to: &str, at: i64, read: bool) {
        sqlx::query(
            "INSERT INTO messages (id, sender_id, receiver_id, content, created_at, read) \
             VALUES (?1, ?2, ?3, 'msg ' || ?1, ?4, ?5)",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(at)
        .bind(read)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn groups_counts_and_orders() {
        let pool = pool().await;
        user(&pool, "u", "Us", "STUDENT").await;
        user(&pool, "a", "Alice", "TUTOR").await;
        user(&pool, "b", "Bob", "TUTOR").await;

        message(&pool, "ma1", "a", "u", 100, false).await;
        message(&pool, "ma2", "u", "a", 200, false).await;
        message(&pool, "mb1", "b", "u", 150, false).await;
        message(&pool, "mb2", "b", "u", 150, false).await;

        let convos = list_conversations(&pool, "u").await.unwrap();
        assert_eq!(convos.len(), 2);

        // Alice's thread is the most recent.
        assert_eq!(convos[0].id, "a");
        assert_eq!(convos[0].last_message.content, "msg ma2");
        assert_eq!(convos[0].unread_count, 1);

        // Bob's two messages share a timestamp; the larger id wins.
        assert_eq!(convos[1].id, "b");
        assert_eq!(convos[1].last_message.content, "msg mb2");
        assert_eq!(convos[1].unread_count, 2);

        // Unread counts only consider counterparty -> user, so Alice
        // sees nothing unread even though "ma1" is unread for "u".
        let for_alice = list_conversations(&pool, "a").await.unwrap();
        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_alice[0].unread_count, 0);
    }

    #[tokio::test]
    async fn empty_without_messages() {
        let pool = pool().await;
        user(&pool, "u", "Us", "STUDENT").await;
        assert!(list_conversations(&pool, "u").await.unwrap().is_empty());
    }
}
