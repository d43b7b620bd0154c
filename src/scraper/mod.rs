pub mod date_range;
pub mod http_client;
pub mod transform;
pub mod urls;

use crate::config::ScraperConfig;
use anyhow::Result;
use async_trait::async_trait;

use self::http_client::HttpClient;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable raw-text source abstraction; the pipeline is tested against an
/// in-memory implementation.
#[async_trait]
pub trait BuoyDataSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

// ── NDBC source ───────────────────────────────────────────────────────────────

pub struct NdbcSource {
    client: HttpClient,
}

impl NdbcSource {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl BuoyDataSource for NdbcSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.client.get_text(url).await
    }
}
