//! Persistence port for signals.

use std::future::Future;

use crate::domain::{Signal, SignalStatus, TokenAddress};
use crate::error::Result;

/// Storage operations for signals.
///
/// The address is the natural key: inserting an address that already exists
/// is a no-op, so `buy_price` and `sell_price` never change after the first
/// detection.
pub trait SignalStore: Send + Sync {
    /// Insert a signal unless its address is already present.
    ///
    /// Returns `true` iff a row was actually inserted.
    fn insert_if_absent(&self, signal: &Signal) -> impl Future<Output = Result<bool>> + Send;

    /// List all signals currently in the given status.
    fn list_by_status(
        &self,
        status: SignalStatus,
    ) -> impl Future<Output = Result<Vec<Signal>>> + Send;

    /// Overwrite the status for an address.
    ///
    /// The write is unconditional; transition guards (such as the pending-age
    /// window) live at the call site.
    fn set_status(
        &self,
        address: &TokenAddress,
        status: SignalStatus,
    ) -> impl Future<Output = Result<()>> + Send;
}
