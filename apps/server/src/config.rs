use anyhow::Context;

/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Directory holding the SQLite database (unless DATABASE_URL is set).
    pub data_dir: String,
    /// HS256 key used to verify caller bearer tokens. Token issuance is
    /// handled outside this service.
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let data_dir =
            std::env::var("STOCKFOLIO_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        Ok(Self {
            listen_addr,
            data_dir,
            jwt_secret,
        })
    }
}
