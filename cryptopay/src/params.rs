//! Query-parameter normalization.
//!
//! Every Crypto Pay endpoint is a string-typed query API. Values are rendered
//! through [`ToParam`] so each method encodes them the same way:
//!
//! - absent values are dropped ([`QueryParams::push_opt`])
//! - booleans become `"true"` / `"false"`
//! - lists become comma-joined strings
//! - enums become their wire string
//! - timestamps become RFC 3339

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::model::{Asset, CheckStatus, CurrencyType, Fiat, InvoiceStatus, PaidButton, UpdateType};
use crate::proto::IdSelection;

/// A value that can be sent as a single query-string parameter.
pub trait ToParam {
    /// Renders the value as it appears on the wire.
    fn to_param(&self) -> String;
}

impl ToParam for bool {
    fn to_param(&self) -> String {
        String::from(if *self { "true" } else { "false" })
    }
}

impl ToParam for str {
    fn to_param(&self) -> String {
        self.to_owned()
    }
}

impl ToParam for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ToParam for Decimal {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ToParam for DateTime<Utc> {
    fn to_param(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl ToParam for IdSelection {
    fn to_param(&self) -> String {
        match self {
            Self::One(id) => id.to_string(),
            Self::Many(ids) => ids.to_param(),
        }
    }
}

impl<T: ToParam> ToParam for [T] {
    fn to_param(&self) -> String {
        self.iter()
            .map(ToParam::to_param)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T: ToParam> ToParam for Vec<T> {
    fn to_param(&self) -> String {
        self.as_slice().to_param()
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

macro_rules! display_param {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ToParam for $ty {
                fn to_param(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

display_param!(u8, u16, u32, u64, usize, i32, i64);

macro_rules! wire_param {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ToParam for $ty {
                fn to_param(&self) -> String {
                    self.as_str().to_owned()
                }
            }
        )+
    };
}

wire_param!(
    Asset,
    Fiat,
    PaidButton,
    InvoiceStatus,
    CheckStatus,
    CurrencyType,
    UpdateType,
);

/// Ordered query-string parameters of one API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a parameter.
    pub fn push<V: ToParam + ?Sized>(&mut self, key: &'static str, value: &V) -> &mut Self {
        self.pairs.push((key, value.to_param()));
        self
    }

    /// Appends a parameter if the value is present.
    pub fn push_opt<V: ToParam>(&mut self, key: &'static str, value: Option<&V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Builder form of [`QueryParams::push`].
    #[must_use]
    pub fn with<V: ToParam + ?Sized>(mut self, key: &'static str, value: &V) -> Self {
        self.push(key, value);
        self
    }

    /// Returns the value of the first parameter named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the rendered pairs in insertion order.
    #[must_use]
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no parameter was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
