//! Status refresh for pending signals.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{SignalStatus, TokenAddress};
use crate::error::Result;
use crate::port::outbound::{Event, Notifier, PriceFeed, SignalEvent, SignalStore};

/// Re-scans pending signals against fresh feed prices.
///
/// A pending signal becomes `success` the moment its current price reaches
/// the sell target, regardless of age. It becomes `failure` only once the
/// pending window has elapsed without success; a token that vanished from
/// the feed stays pending until then.
pub struct StatusUpdater<F, S> {
    feed: Arc<F>,
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    max_pending_age: chrono::Duration,
}

impl<F: PriceFeed, S: SignalStore> StatusUpdater<F, S> {
    pub fn new(
        feed: Arc<F>,
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        max_pending_age: chrono::Duration,
    ) -> Self {
        Self {
            feed,
            store,
            notifier,
            max_pending_age,
        }
    }

    /// Run one refresh pass against the current clock.
    pub async fn refresh(&self) -> Result<()> {
        self.refresh_at(Utc::now()).await
    }

    /// Run one refresh pass with an explicit `now`, so tests can drive a
    /// cycle deterministically.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<()> {
        let pending = self.store.list_by_status(SignalStatus::Pending).await?;
        if pending.is_empty() {
            return Ok(());
        }

        let snapshots = self.feed.fetch().await?;
        let prices: HashMap<TokenAddress, Decimal> = snapshots
            .into_iter()
            .map(|s| (s.address, s.price))
            .collect();

        let mut succeeded = 0usize;
        let mut expired = 0usize;

        for signal in pending {
            let current_price = prices.get(&signal.address).copied();

            let next_status = match current_price {
                Some(price) if price >= signal.sell_price => SignalStatus::Success,
                _ if signal.age_at(now) > self.max_pending_age => SignalStatus::Failure,
                _ => continue,
            };

            if let Err(e) = self.store.set_status(&signal.address, next_status).await {
                warn!(error = %e, address = %signal.address, "Failed to update signal status");
                continue;
            }

            let event = SignalEvent::from_signal(&signal, None);
            match next_status {
                SignalStatus::Success => {
                    succeeded += 1;
                    self.notifier.notify(Event::SignalSucceeded(event));
                }
                SignalStatus::Failure => {
                    expired += 1;
                    self.notifier.notify(Event::SignalExpired(event));
                }
                SignalStatus::Pending => unreachable!(),
            }
        }

        debug!(succeeded, expired, "Refresh pass complete");
        Ok(())
    }
}
