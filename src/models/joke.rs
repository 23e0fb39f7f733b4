use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Joke {
    pub id: i64,
    pub name: String,
    pub content: String,
    /// Owning user. Nullable so jokes survive without an author row.
    pub jokester_id: Option<i64>,
    pub created_at: chrono::NaiveDateTime,
}
