//! SQLite signal store implementation.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::connection::DbPool;
use crate::adapter::outbound::sqlite::model::SignalRow;
use crate::adapter::outbound::sqlite::schema::signals;
use crate::domain::{Signal, SignalStatus, TokenAddress};
use crate::error::{Error, Result};
use crate::port::outbound::SignalStore;

/// SQLite-backed signal store.
///
/// Implements the [`SignalStore`] trait on top of a shared connection pool.
pub struct SqliteSignalStore {
    pool: DbPool,
}

impl SqliteSignalStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(signal: &Signal) -> SignalRow {
        SignalRow {
            address: signal.address.to_string(),
            name: signal.name.clone(),
            buy_price: signal.buy_price.to_string(),
            sell_price: signal.sell_price.to_string(),
            signal_time: signal.signal_time.to_rfc3339(),
            status: signal.status.as_str().to_string(),
        }
    }

    fn from_row(row: SignalRow) -> Result<Signal> {
        let buy_price = row
            .buy_price
            .parse()
            .map_err(|e: rust_decimal::Error| Error::Parse(e.to_string()))?;
        let sell_price = row
            .sell_price
            .parse()
            .map_err(|e: rust_decimal::Error| Error::Parse(e.to_string()))?;
        let signal_time: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.signal_time)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);
        let status = SignalStatus::parse(&row.status)
            .ok_or_else(|| Error::Parse(format!("unknown signal status `{}`", row.status)))?;

        Ok(Signal {
            name: row.name,
            address: TokenAddress::new(row.address),
            buy_price,
            sell_price,
            signal_time,
            status,
        })
    }
}

impl SignalStore for SqliteSignalStore {
    async fn insert_if_absent(&self, signal: &Signal) -> Result<bool> {
        let row = Self::to_row(signal);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let inserted = diesel::insert_or_ignore_into(signals::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(inserted > 0)
    }

    async fn list_by_status(&self, status: SignalStatus) -> Result<Vec<Signal>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<SignalRow> = signals::table
            .filter(signals::status.eq(status.as_str()))
            .order(signals::signal_time.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn set_status(&self, address: &TokenAddress, status: SignalStatus) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::update(signals::table.find(address.as_str()))
            .set(signals::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
