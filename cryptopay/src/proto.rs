//! Wire envelope handling for Crypto Pay responses.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! {"ok": true, "result": ...}
//! {"ok": false, "error": {"code": 400, "name": "AMOUNT_INVALID"}}
//! ```
//!
//! [`validate`] turns a failed envelope into an [`ApiError`], [`decode`]
//! extracts `result` into a typed record, and [`Selection`] implements the
//! empty / single / list unwrapping of the `get*` list endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, EnvelopeError};

/// Checks an envelope and returns it unchanged when `ok` is `true`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Api`] when `ok` is `false`, and
/// [`EnvelopeError::Malformed`] when the value is not an envelope at all.
pub fn validate(envelope: Value) -> Result<Value, EnvelopeError> {
    let ok = envelope
        .as_object()
        .ok_or_else(|| EnvelopeError::malformed("response is not a JSON object"))?
        .get("ok")
        .and_then(Value::as_bool)
        .ok_or_else(|| EnvelopeError::malformed("missing boolean `ok` field"))?;

    if ok {
        return Ok(envelope);
    }

    let error = envelope
        .get("error")
        .ok_or_else(|| EnvelopeError::malformed("`ok` is false but `error` is missing"))?;
    let code = error
        .get("code")
        .and_then(Value::as_i64)
        .ok_or_else(|| EnvelopeError::malformed("`error.code` is not an integer"))?;
    let name = error
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| EnvelopeError::malformed("`error.name` is not a string"))?;

    Err(ApiError::new(code, name).into())
}

/// Returns the `result` member of a validated envelope.
///
/// # Errors
///
/// Returns [`EnvelopeError::Malformed`] if `result` is absent.
pub fn result(envelope: &Value) -> Result<&Value, EnvelopeError> {
    envelope
        .get("result")
        .ok_or_else(|| EnvelopeError::malformed("`ok` is true but `result` is missing"))
}

/// Decodes the `result` member of a validated envelope into `T`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Malformed`] if `result` is absent and
/// [`EnvelopeError::Schema`] if it does not match `T`.
pub fn decode<T: DeserializeOwned>(envelope: &Value) -> Result<T, EnvelopeError> {
    T::deserialize(result(envelope)?).map_err(EnvelopeError::Schema)
}

/// One page of a list endpoint: `{"items": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
}

/// Ids passed to a list endpoint: a single id or several.
///
/// The shape of the request decides the shape of the answer, see
/// [`Selection::from_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSelection {
    /// Exactly one id; the answer unwraps to a single record.
    One(u64),
    /// Any number of ids; the answer stays a list.
    Many(Vec<u64>),
}

impl IdSelection {
    /// Returns `true` when a single scalar id was requested.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::One(_))
    }

    /// Returns `None` for an empty id list, so it is left out of the request.
    #[must_use]
    pub fn non_empty(self) -> Option<Self> {
        match self {
            Self::Many(ids) if ids.is_empty() => None,
            other => Some(other),
        }
    }
}

impl From<u64> for IdSelection {
    fn from(value: u64) -> Self {
        Self::One(value)
    }
}

impl From<Vec<u64>> for IdSelection {
    fn from(value: Vec<u64>) -> Self {
        Self::Many(value)
    }
}

impl From<&[u64]> for IdSelection {
    fn from(value: &[u64]) -> Self {
        Self::Many(value.to_vec())
    }
}

impl<const N: usize> From<[u64; N]> for IdSelection {
    fn from(value: [u64; N]) -> Self {
        Self::Many(value.to_vec())
    }
}

/// Decoded answer of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// The server returned no items.
    Empty,
    /// A single scalar id was requested and found.
    Single(T),
    /// Items in server order.
    Many(Vec<T>),
}

impl<T> Selection<T> {
    /// Applies the list decoding rule.
    ///
    /// - no items → [`Selection::Empty`]
    /// - a scalar id was requested → [`Selection::Single`] with the first item
    /// - otherwise → [`Selection::Many`], preserving server order
    #[must_use]
    pub fn from_page(page: Page<T>, requested: Option<&IdSelection>) -> Self {
        let mut items = page.items;
        if items.is_empty() {
            return Self::Empty;
        }
        if requested.is_some_and(IdSelection::is_scalar) {
            return Self::Single(items.swap_remove(0));
        }
        Self::Many(items)
    }

    /// Returns `true` if nothing was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Returns the single record, or `None` for any other shape.
    #[must_use]
    pub fn single(self) -> Option<T> {
        match self {
            Self::Single(item) => Some(item),
            _ => None,
        }
    }

    /// Flattens any shape into a list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> From<Selection<T>> for Vec<T> {
    fn from(value: Selection<T>) -> Self {
        value.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_ok_returns_mapping_unchanged() {
        let envelope = json!({"ok": true, "result": {"app_id": 1}});
        let validated = validate(envelope.clone()).unwrap();
        assert_eq!(validated, envelope);
    }

    #[test]
    fn test_validate_failed_envelope() {
        let envelope = json!({"ok": false, "error": {"code": 400, "name": "AMOUNT_INVALID"}});
        let err = validate(envelope).unwrap_err();
        match err {
            EnvelopeError::Api(api) => {
                assert_eq!(api.code, 400);
                assert_eq!(api.name, "AMOUNT_INVALID");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_malformed_envelopes() {
        for value in [
            json!([1, 2, 3]),
            json!({"result": 1}),
            json!({"ok": "true", "result": 1}),
            json!({"ok": false}),
            json!({"ok": false, "error": {"code": "400", "name": "X"}}),
            json!({"ok": false, "error": {"code": 400}}),
        ] {
            assert!(
                matches!(validate(value.clone()), Err(EnvelopeError::Malformed(_))),
                "expected malformed for {value}"
            );
        }
    }

    #[test]
    fn test_decode_result() {
        let envelope = json!({"ok": true, "result": true});
        assert!(decode::<bool>(&envelope).unwrap());

        let missing = json!({"ok": true});
        assert!(matches!(decode::<bool>(&missing), Err(EnvelopeError::Malformed(_))));

        let wrong = json!({"ok": true, "result": "yes"});
        assert!(matches!(decode::<bool>(&wrong), Err(EnvelopeError::Schema(_))));
    }

    #[test]
    fn test_non_empty_drops_only_empty_lists() {
        assert_eq!(IdSelection::Many(vec![]).non_empty(), None);
        assert_eq!(IdSelection::One(0).non_empty(), Some(IdSelection::One(0)));
        assert_eq!(
            IdSelection::from([1, 2]).non_empty(),
            Some(IdSelection::Many(vec![1, 2]))
        );
    }

    #[test]
    fn test_selection_scalar_request_unwraps() {
        let page = Page { items: vec![42] };
        let selection = Selection::from_page(page, Some(&IdSelection::One(42)));
        assert_eq!(selection, Selection::Single(42));
    }

    #[test]
    fn test_selection_list_request_keeps_server_order() {
        let page = Page { items: vec![43, 42] };
        let selection = Selection::from_page(page, Some(&IdSelection::from([42, 43])));
        assert_eq!(selection, Selection::Many(vec![43, 42]));
    }

    #[test]
    fn test_selection_single_item_for_list_request_stays_a_list() {
        let page = Page { items: vec![7] };
        let selection = Selection::from_page(page, Some(&IdSelection::Many(vec![7])));
        assert_eq!(selection, Selection::Many(vec![7]));
        let unfiltered = Selection::from_page(Page { items: vec![7] }, None);
        assert_eq!(unfiltered, Selection::Many(vec![7]));
    }

    #[test]
    fn test_selection_empty() {
        for requested in [None, Some(IdSelection::One(1)), Some(IdSelection::Many(vec![1, 2]))] {
            let selection = Selection::<u64>::from_page(Page { items: vec![] }, requested.as_ref());
            assert!(selection.is_empty());
            assert_eq!(selection.len(), 0);
        }
    }

    #[test]
    fn test_selection_into_vec() {
        assert_eq!(Selection::Single(1).into_vec(), vec![1]);
        assert_eq!(Vec::from(Selection::Many(vec![1, 2])), vec![1, 2]);
        assert!(Selection::<u8>::Empty.into_vec().is_empty());
        assert_eq!(Selection::Many(vec![1]).single(), None);
    }
}
