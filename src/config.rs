//! Runtime configuration read from the environment
//!
//! A `.env` file in the working directory is loaded first, if present.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "tutorials.db";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
pub const DEFAULT_CLIENT_DIST: &str = "client/dist";
pub const DEFAULT_LOG_FILTER: &str = "tutorials=debug,tower_http=debug";

#[derive(Debug, Clone)]
pub struct Config {
    /// `PORT`
    pub port: u16,
    /// `DATABASE_URL` - path of the redb data file
    pub database_url: String,
    /// `WEATHER_BASE_URL`
    pub weather_base_url: String,
    /// `WEATHER_API_KEY`
    pub weather_api_key: String,
    /// `CLIENT_DIST` - served only when the directory exists
    pub client_dist: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            weather_base_url: var_or("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL),
            weather_api_key: var_or("WEATHER_API_KEY", ""),
            client_dist: PathBuf::from(var_or("CLIENT_DIST", DEFAULT_CLIENT_DIST)),
        }
    }

    /// The client directory, if it has been built
    pub fn client_dist(&self) -> Option<&std::path::Path> {
        self.client_dist
            .is_dir()
            .then_some(self.client_dist.as_path())
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
