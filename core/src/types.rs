//! Domain DTOs for the resource API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently, so
//! the client never links against server internals. The live integration
//! test catches any schema drift between the two crates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ResourceId = i64;

/// A resource as sent to and returned by the API.
///
/// Used both as the create/update payload and as the parsed result of a
/// retrieve. `price` serializes as a JSON number with its exact scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub quantity: i64,
    #[serde(with = "exact_price")]
    pub price: Decimal,
}

/// Serde codec for prices: a JSON number whose text must survive the trip
/// into `Decimal` unchanged. Anything that would be rounded is rejected.
mod exact_price {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Number::from_str(&price.to_string())
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        let text = number.to_string();
        let price = Decimal::from_str_exact(&text)
            .map_err(|e| de::Error::custom(format!("price {text} cannot be stored exactly: {e}")))?;
        if price.to_string() != text {
            return Err(de::Error::custom(format!("price {text} cannot be stored exactly")));
        }
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_digits_survive_a_parse() {
        let json = r#"{"id":1,"name":"ElectricFan","quantity":15,"price":29.80}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&resource).unwrap(), json);
    }

    #[test]
    fn price_beyond_decimal_precision_is_a_parse_error() {
        let result: Result<Resource, _> = serde_json::from_str(
            r#"{"id":5,"name":"Dust","quantity":1,"price":0.1000000000000000000000000000001}"#,
        );
        assert!(result.is_err());
    }
}
