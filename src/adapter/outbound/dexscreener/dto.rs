//! Wire types for the DexScreener pairs endpoint.
//!
//! The feed is loose with numbers: prices arrive as strings, volumes as
//! numbers, and any field may be absent or null. Every numeric field decodes
//! to zero rather than failing the batch.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Top-level response of `/latest/dex/pairs/{chain}`.
#[derive(Debug, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<PairDto>>,
}

/// One pair record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDto {
    #[serde(default)]
    pub base_token: BaseTokenDto,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_usd: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub liquidity: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub age: Decimal,
}

/// The traded token of a pair.
#[derive(Debug, Default, Deserialize)]
pub struct BaseTokenDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Accept a decimal encoded as a JSON number, a string, or null.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Number(n)) => Decimal::from_f64(n).unwrap_or(Decimal::ZERO),
        Some(Raw::Text(s)) => s.parse().unwrap_or(Decimal::ZERO),
        None => Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_full_record() {
        let json = r#"{
            "pairs": [{
                "baseToken": {"name": "BONK", "address": "Addr1"},
                "priceUsd": "0.00001",
                "volume": 2000,
                "liquidity": 6000,
                "age": 3
            }]
        }"#;

        let response: PairsResponse = serde_json::from_str(json).unwrap();
        let pairs = response.pairs.unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].base_token.name, "BONK");
        assert_eq!(pairs[0].base_token.address, "Addr1");
        assert_eq!(pairs[0].price_usd, dec!(0.00001));
        assert_eq!(pairs[0].volume, dec!(2000));
        assert_eq!(pairs[0].liquidity, dec!(6000));
    }

    #[test]
    fn price_accepts_number_encoding() {
        let json = r#"{"pairs": [{"baseToken": {"name": "X", "address": "a"}, "priceUsd": 1.5}]}"#;
        let response: PairsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pairs.unwrap()[0].price_usd, dec!(1.5));
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let json = r#"{"pairs": [{"baseToken": {"name": "X", "address": "a"}}]}"#;
        let response: PairsResponse = serde_json::from_str(json).unwrap();
        let pair = &response.pairs.unwrap()[0];
        assert_eq!(pair.price_usd, Decimal::ZERO);
        assert_eq!(pair.volume, Decimal::ZERO);
        assert_eq!(pair.liquidity, Decimal::ZERO);
        assert_eq!(pair.age, Decimal::ZERO);
    }

    #[test]
    fn null_numeric_fields_default_to_zero() {
        let json = r#"{"pairs": [{"baseToken": {"name": "X", "address": "a"}, "priceUsd": null, "volume": null}]}"#;
        let response: PairsResponse = serde_json::from_str(json).unwrap();
        let pair = &response.pairs.unwrap()[0];
        assert_eq!(pair.price_usd, Decimal::ZERO);
        assert_eq!(pair.volume, Decimal::ZERO);
    }

    #[test]
    fn unparseable_price_string_defaults_to_zero() {
        let json = r#"{"pairs": [{"baseToken": {"name": "X", "address": "a"}, "priceUsd": "n/a"}]}"#;
        let response: PairsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pairs.unwrap()[0].price_usd, Decimal::ZERO);
    }

    #[test]
    fn null_pairs_decodes_to_none() {
        let response: PairsResponse = serde_json::from_str(r#"{"pairs": null}"#).unwrap();
        assert!(response.pairs.is_none());

        let response: PairsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.pairs.is_none());
    }

    #[test]
    fn missing_base_token_defaults_to_empty() {
        let json = r#"{"pairs": [{"priceUsd": "1.0"}]}"#;
        let response: PairsResponse = serde_json::from_str(json).unwrap();
        let pair = &response.pairs.unwrap()[0];
        assert!(pair.base_token.address.is_empty());
        assert!(pair.base_token.name.is_empty());
    }
}
