//! Server configuration from CLI flags, environment, and `.env`.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("itemsheet")
}

fn default_db_path() -> PathBuf {
    app_data_dir().join("app.db")
}

#[derive(Debug, Clone, Parser)]
#[command(name = "itemsheet", version, about = "Item CRUD service with Excel import/export")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "ITEMSHEET_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "ITEMSHEET_PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database file
    #[arg(long, env = "ITEMSHEET_DB_PATH", default_value_os_t = default_db_path())]
    pub db_path: PathBuf,

    /// Largest accepted upload, in megabytes
    #[arg(long, env = "ITEMSHEET_MAX_UPLOAD_MB", default_value_t = 10)]
    pub max_upload_mb: usize,
}

impl Config {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from([
            "itemsheet",
            "--host",
            "127.0.0.1",
            "--port",
            "9001",
            "--db-path",
            "/tmp/items.db",
            "--max-upload-mb",
            "2",
        ]);
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9001");
        assert_eq!(config.db_path, PathBuf::from("/tmp/items.db"));
        assert_eq!(config.max_upload_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn default_db_lives_under_app_data_dir() {
        assert!(default_db_path().ends_with("itemsheet/app.db"));
    }
}
