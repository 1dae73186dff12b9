use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Externally supplied key of a stored resource.
pub type ResourceId = i64;

/// The single resource type held by the service.
///
/// `price` goes over the wire as a JSON number with exactly the fractional
/// digits it was given, so `20.90` is echoed back as `20.90`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

    fn fan() -> Resource {
        Resource {
            id: 1,
            name: "ElectricFan".to_string(),
            quantity: 14,
            price: Decimal::new(2090, 2),
        }
    }

    #[test]
    fn resource_serializes_fields_in_order() {
        let json = serde_json::to_string(&fan()).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"ElectricFan","quantity":14,"price":20.90}"#);
    }

    #[test]
    fn price_keeps_given_fractional_digits() {
        let resource: Resource =
            serde_json::from_str(r#"{"id":2,"name":"Lamp","quantity":1,"price":29.80}"#).unwrap();
        assert_eq!(resource.price.scale(), 2);
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["price"].to_string(), "29.80");
    }

    #[test]
    fn price_that_would_be_rounded_is_rejected() {
        let result: Result<Resource, _> = serde_json::from_str(
            r#"{"id":5,"name":"Dust","quantity":1,"price":0.1000000000000000000000000000001}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn price_given_as_string_is_rejected() {
        let result: Result<Resource, _> =
            serde_json::from_str(r#"{"id":5,"name":"Fan","quantity":1,"price":"20.90"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn negative_and_whole_prices_round_trip() {
        for price in ["-3.50", "20", "0.001"] {
            let json = format!(r#"{{"id":1,"name":"x","quantity":0,"price":{price}}}"#);
            let resource: Resource = serde_json::from_str(&json).unwrap();
            assert_eq!(serde_json::to_string(&resource).unwrap(), json);
        }
    }

    #[test]
    fn resource_rejects_missing_field() {
        let result: Result<Resource, _> =
            serde_json::from_str(r#"{"id":1,"name":"NoPrice","quantity":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn resource_rejects_non_integer_id() {
        let result: Result<Resource, _> =
            serde_json::from_str(r#"{"id":"one","name":"Fan","quantity":3,"price":1.00}"#);
        assert!(result.is_err());
    }
}
