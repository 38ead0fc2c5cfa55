//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::signals;

/// Database row for a signal.
///
/// Prices are stored as decimal text to keep the sell target exact;
/// `signal_time` is RFC 3339 UTC text.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = signals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SignalRow {
    pub address: String,
    pub name: String,
    pub buy_price: String,
    pub sell_price: String,
    pub signal_time: String,
    pub status: String,
}
