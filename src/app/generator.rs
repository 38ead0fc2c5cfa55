//! Signal generation: feed snapshot → screening → persistence.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{admission_reason, ScreenConfig, Signal};
use crate::error::Result;
use crate::port::outbound::{Event, Notifier, PriceFeed, SignalEvent, SignalStore};

/// One qualifying token from a generation cycle.
#[derive(Debug, Clone)]
pub struct Generated {
    pub signal: Signal,
    pub reason: String,
    /// Whether this cycle actually created the row. Re-detections of an
    /// already-stored address come back `false`.
    pub inserted: bool,
}

/// Pulls the feed, screens snapshots, and persists qualifying tokens.
///
/// Persistence is idempotent on the token address; push notifications fire
/// only for rows created in this cycle, so re-detections stay silent.
pub struct SignalGenerator<F, S> {
    feed: Arc<F>,
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    screen: ScreenConfig,
}

impl<F: PriceFeed, S: SignalStore> SignalGenerator<F, S> {
    pub fn new(
        feed: Arc<F>,
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        screen: ScreenConfig,
    ) -> Self {
        Self {
            feed,
            store,
            notifier,
            screen,
        }
    }

    /// Run one generation pass and return every qualifying token.
    ///
    /// A store failure for one token is logged and skipped; the rest of the
    /// batch proceeds.
    pub async fn generate(&self) -> Result<Vec<Generated>> {
        let snapshots = self.feed.fetch().await?;
        let mut generated = Vec::new();

        for snapshot in &snapshots {
            if !self.screen.qualifies(snapshot) {
                continue;
            }

            let signal = self.screen.admit(snapshot);
            let reason = admission_reason(snapshot);

            let inserted = match self.store.insert_if_absent(&signal).await {
                Ok(inserted) => inserted,
                Err(e) => {
                    warn!(error = %e, address = %signal.address, "Failed to persist signal");
                    continue;
                }
            };

            if inserted {
                self.notifier.notify(Event::SignalDetected(SignalEvent::from_signal(
                    &signal,
                    Some(reason.clone()),
                )));
            }

            generated.push(Generated {
                signal,
                reason,
                inserted,
            });
        }

        debug!(
            snapshots = snapshots.len(),
            qualifying = generated.len(),
            fresh = generated.iter().filter(|g| g.inserted).count(),
            "Generation pass complete"
        );

        Ok(generated)
    }
}
