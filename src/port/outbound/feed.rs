//! Price feed port.

use std::future::Future;

use crate::domain::TokenSnapshot;
use crate::error::Result;

/// Source of token market snapshots.
///
/// A fetch returns every pair the feed currently reports; an empty vector is
/// a valid answer (the feed had nothing, or answered with a non-success
/// status). Transport failures surface as errors and are handled by callers.
pub trait PriceFeed: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<TokenSnapshot>>> + Send;
}
