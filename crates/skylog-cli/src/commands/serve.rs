//! Web server command

use std::path::Path;

use anyhow::Result;
use skylog_server::ServerConfig;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    cors_origins: Vec<String>,
) -> Result<()> {
    let db = super::open_db(db_path)?;

    println!("🌐 Starting Skylog server on http://{}:{}", host, port);
    if !cors_origins.is_empty() {
        println!("   CORS origins: {}", cors_origins.join(", "));
    }

    let config = ServerConfig {
        allowed_origins: cors_origins,
    };

    skylog_server::serve(db, host, port, config).await
}
