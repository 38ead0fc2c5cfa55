//! Scripted [`PriceFeed`] implementations.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::domain::TokenSnapshot;
use crate::error::{Error, Result};
use crate::port::outbound::PriceFeed;

/// Feed fake that serves pre-scripted batches in order.
///
/// Once the script runs out, further fetches return empty batches. Every
/// fetch is counted so tests can assert that a path never touched the feed.
pub struct ScriptedFeed {
    batches: Mutex<VecDeque<Vec<TokenSnapshot>>>,
    calls: AtomicUsize,
    fail: bool,
}

impl ScriptedFeed {
    #[must_use]
    pub fn new(batches: Vec<Vec<TokenSnapshot>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A feed whose every fetch fails with a connection error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            batches: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Number of fetches performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceFeed for ScriptedFeed {
    async fn fetch(&self) -> Result<Vec<TokenSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(Error::Connection("scripted feed failure".into()));
        }

        Ok(self.batches.lock().pop_front().unwrap_or_default())
    }
}
