use clap::Parser;
use std::net::SocketAddr;

/// Favorites service settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "favorites-server", version, about = "Favorite cities API")]
pub struct ServerConfig {
    #[arg(long, env = "FAVORITES_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "FAVORITES_PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite connection string; the file is created when missing.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://favourites.db?mode=rwc")]
    pub database_url: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Comma-separated list of allowed origins, or "*".
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        default_value = "*",
        value_delimiter = ','
    )]
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn server_address(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid address {}:{}: {}", self.host, self.port, e))
    }
}
