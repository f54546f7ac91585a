use anyhow::Context;

const DEFAULT_PORT: u16 = 8080;

/// Built once in `main` and handed to whoever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match dotenv::var("PORT") {
            Ok(port) => port.parse().context("PORT is not a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };
        let database_url = dotenv::var("DATABASE_URL").context("DATABASE_URL is not set")?;

        Ok(Self { port, database_url })
    }
}
