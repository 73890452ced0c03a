//! Lenient field decoders.
//!
//! A few fields are typed inconsistently across API revisions: `is_swapped`
//! arrives as `"true"`/`"false"`, and user ids arrive as either numbers or
//! numeric strings.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct BoolVisitor;

impl Visitor<'_> for BoolVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or the string \"true\"/\"false\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        match v {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer id or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// Decodes an optional boolean that may be sent as a string.
pub(crate) fn option_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<bool>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            BoolVisitor.expecting(f)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(BoolVisitor).map(Some)
        }
    }

    d.deserialize_option(OptionVisitor)
}

/// Decodes an id that may be sent as a number or a numeric string.
pub(crate) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    d.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::option_bool")]
        flag: Option<bool>,
        #[serde(deserialize_with = "super::id")]
        user: i64,
    }

    #[test]
    fn test_string_and_native_values() {
        let a: Probe = serde_json::from_str(r#"{"flag": "true", "user": "42"}"#).unwrap();
        assert_eq!(a.flag, Some(true));
        assert_eq!(a.user, 42);

        let b: Probe = serde_json::from_str(r#"{"flag": false, "user": 7}"#).unwrap();
        assert_eq!(b.flag, Some(false));
        assert_eq!(b.user, 7);
    }

    #[test]
    fn test_missing_and_null_flag() {
        let a: Probe = serde_json::from_str(r#"{"user": 1}"#).unwrap();
        assert_eq!(a.flag, None);
        let b: Probe = serde_json::from_str(r#"{"flag": null, "user": 1}"#).unwrap();
        assert_eq!(b.flag, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"flag": "yes", "user": 1}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"user": "abc"}"#).is_err());
    }
}
