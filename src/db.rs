//! Thin data-access layer over SQLite. Every operation is a single query;
//! there are no transactions because nothing here needs more than one
//! statement.

use sqlx::SqlitePool;

use crate::models::{joke::Joke, user::User};

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jokes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            content TEXT NOT NULL,
            jokester_id INTEGER REFERENCES users(id),
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash) VALUES (?, ?) RETURNING *",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn username_taken(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

pub async fn create_joke(
    pool: &SqlitePool,
    name: &str,
    content: &str,
    jokester_id: i64,
) -> Result<Joke, sqlx::Error> {
    sqlx::query_as::<_, Joke>(
        "INSERT INTO jokes (name, content, jokester_id) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(name)
    .bind(content)
    .bind(jokester_id)
    .fetch_one(pool)
    .await
}

pub async fn find_joke(pool: &SqlitePool, id: i64) -> Result<Option<Joke>, sqlx::Error> {
    sqlx::query_as::<_, Joke>("SELECT * FROM jokes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn joke_count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jokes")
        .fetch_one(pool)
        .await
}

/// Fetches the joke at a given offset in id order. Paired with
/// [`joke_count`] to pick one uniformly at random; a concurrent delete
/// between the two queries can make this come back empty.
pub async fn joke_at_offset(pool: &SqlitePool, offset: i64) -> Result<Option<Joke>, sqlx::Error> {
    sqlx::query_as::<_, Joke>("SELECT * FROM jokes ORDER BY id LIMIT 1 OFFSET ?")
        .bind(offset)
        .fetch_optional(pool)
        .await
}

pub async fn delete_joke(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jokes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
