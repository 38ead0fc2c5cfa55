//! In-memory [`SignalStore`] fake.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{Signal, SignalStatus, TokenAddress};
use crate::error::Result;
use crate::port::outbound::SignalStore;

/// Hash-map-backed store with the same idempotence semantics as the SQLite
/// adapter.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<String, Signal>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a signal unconditionally, bypassing idempotence. For test
    /// setup only.
    pub fn seed(&self, signal: Signal) {
        self.rows
            .write()
            .insert(signal.address.to_string(), signal);
    }

    #[must_use]
    pub fn get(&self, address: &str) -> Option<Signal> {
        self.rows.read().get(address).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl SignalStore for MemoryStore {
    async fn insert_if_absent(&self, signal: &Signal) -> Result<bool> {
        let mut rows = self.rows.write();
        let key = signal.address.to_string();
        if rows.contains_key(&key) {
            return Ok(false);
        }
        rows.insert(key, signal.clone());
        Ok(true)
    }

    async fn list_by_status(&self, status: SignalStatus) -> Result<Vec<Signal>> {
        let mut matching: Vec<Signal> = self
            .rows
            .read()
            .values()
            .filter(|s| s.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.signal_time);
        Ok(matching)
    }

    async fn set_status(&self, address: &TokenAddress, status: SignalStatus) -> Result<()> {
        if let Some(row) = self.rows.write().get_mut(address.as_str()) {
            row.status = status;
        }
        Ok(())
    }
}
