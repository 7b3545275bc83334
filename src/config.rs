use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub snapshot_path: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:repset.db?mode=rwc".to_string()),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .unwrap_or_else(|_| "repset-active-workout.json".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
