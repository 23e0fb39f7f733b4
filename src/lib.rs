pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod validate;

use sqlx::SqlitePool;

use crate::session::SessionKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub keys: SessionKeys,
}
