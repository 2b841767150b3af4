use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub catalog_database_url: String,
    pub activity_log_database_url: String,
    pub page_size: u64,
    pub top_queries_limit: u64,
    pub recent_queries_limit: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let catalog_database_url = std::env::var("CATALOG_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://catalog.db?mode=rwc".to_string());

        let activity_log_database_url = std::env::var("ACTIVITY_LOG_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://activity_log.db?mode=rwc".to_string());

        let page_size: u64 =
            std::env::var("PAGE_SIZE").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let top_queries_limit: u64 =
            std::env::var("TOP_QUERIES_LIMIT").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let recent_queries_limit: u64 =
            std::env::var("RECENT_QUERIES_LIMIT").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            catalog_database_url,
            activity_log_database_url,
            page_size: page_size.max(1),
            top_queries_limit,
            recent_queries_limit,
        })
    }
}
