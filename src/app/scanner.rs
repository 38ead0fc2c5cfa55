//! Background scan loop with an explicit start/stop lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app::generator::SignalGenerator;
use crate::app::updater::StatusUpdater;
use crate::port::outbound::{PriceFeed, SignalStore};

/// Periodic driver: one generation pass, one refresh pass, then sleep.
///
/// Failures inside a cycle are logged and the loop carries on; a failing
/// feed endpoint is simply retried next cycle.
pub struct Scanner<F, S> {
    generator: SignalGenerator<F, S>,
    updater: StatusUpdater<F, S>,
    interval: Duration,
}

/// Handle for stopping a spawned scanner.
pub struct ScannerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ScannerHandle {
    /// Signal the loop to stop and wait for it to wind down.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

impl<F, S> Scanner<F, S>
where
    F: PriceFeed + 'static,
    S: SignalStore + 'static,
{
    pub fn new(
        generator: SignalGenerator<F, S>,
        updater: StatusUpdater<F, S>,
        interval: Duration,
    ) -> Self {
        Self {
            generator,
            updater,
            interval,
        }
    }

    /// Run a single scan cycle: generate, then refresh.
    pub async fn run_cycle(&self) {
        if let Err(e) = self.generator.generate().await {
            error!(error = %e, "Signal generation failed");
        }

        if let Err(e) = self.updater.refresh().await {
            error!(error = %e, "Status refresh failed");
        }
    }

    /// Spawn the scan loop onto the runtime and return its stop handle.
    #[must_use]
    pub fn spawn(self: Arc<Self>) -> ScannerHandle {
        let (stop, mut stopped) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(interval_secs = self.interval.as_secs(), "Scanner started");

            loop {
                self.run_cycle().await;

                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    changed = stopped.changed() => {
                        // A dropped sender counts as a stop request.
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Scanner stopped");
        });

        ScannerHandle { stop, task }
    }
}
