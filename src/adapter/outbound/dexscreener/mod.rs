//! DexScreener price feed client.
//!
//! One GET per fetch against the configured pairs endpoint. A non-success
//! status is logged and treated as an empty batch; only transport failures
//! surface as errors. No retries, no pagination.

mod dto;

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::domain::{TokenAddress, TokenSnapshot};
use crate::error::Result;
use crate::port::outbound::PriceFeed;

use dto::PairsResponse;

/// Default pairs endpoint for the Solana chain.
pub const DEFAULT_FEED_URL: &str = "https://api.dexscreener.com/latest/dex/pairs/solana";

/// Default request timeout. DexScreener is fast; 10s is plenty.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Feed endpoint configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP client for the DexScreener pairs endpoint.
pub struct DexScreenerFeed {
    client: reqwest::Client,
    url: String,
}

impl DexScreenerFeed {
    /// Build a feed client with the configured endpoint and timeout.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

impl PriceFeed for DexScreenerFeed {
    async fn fetch(&self) -> Result<Vec<TokenSnapshot>> {
        let response = self.client.get(&self.url).send().await?;

        if response.status() != StatusCode::OK {
            warn!(status = %response.status(), "Feed returned non-success status");
            return Ok(Vec::new());
        }

        let body: PairsResponse = response.json().await?;
        let snapshots = snapshots_from_response(body);
        debug!(count = snapshots.len(), "Fetched feed snapshots");
        Ok(snapshots)
    }
}

/// Map wire records into domain snapshots, dropping records with no address.
fn snapshots_from_response(response: PairsResponse) -> Vec<TokenSnapshot> {
    response
        .pairs
        .unwrap_or_default()
        .into_iter()
        .filter_map(|pair| {
            if pair.base_token.address.is_empty() {
                debug!("Skipping pair without a token address");
                return None;
            }
            Some(TokenSnapshot {
                name: pair.base_token.name,
                address: TokenAddress::new(pair.base_token.address),
                price: pair.price_usd,
                volume: pair.volume,
                liquidity: pair.liquidity,
                age: pair.age,
            })
        })
        .collect()
}
