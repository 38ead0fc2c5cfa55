//! Diesel table definitions.

diesel::table! {
    signals (address) {
        address -> Text,
        name -> Text,
        buy_price -> Text,
        sell_price -> Text,
        signal_time -> Text,
        status -> Text,
    }
}
