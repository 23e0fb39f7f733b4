use std::env;

/// Runtime configuration, collected from the environment once at startup.
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub listen_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            session_secret: env::var("SESSION_SECRET")?,
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        })
    }
}
