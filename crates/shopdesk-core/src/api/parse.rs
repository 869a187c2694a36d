//! Response shape discrimination.
//!
//! The backend is not consistent about envelopes: a product write may come
//! back as `{"product": {...}}`, `{"data": {...}}` or as the bare object, and
//! lists may be a bare array or a paginator with a `data` array. Each call
//! site states its accepted shapes as an ordered list of [`Envelope`] rules;
//! the first rule that finds a non-null value wins, and a value that does
//! not deserialize is a [`MalformedResponse`] rather than a silent fallback.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Page, PageMeta};

use super::MalformedResponse;

/// One place an entity may live in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// A non-null member of the top-level object
    Key(&'static str),
    /// The body itself
    Root,
}

/// Find the entity according to `rules`, in order.
pub fn locate<'a>(body: &'a Value, rules: &[Envelope]) -> Option<&'a Value> {
    rules.iter().find_map(|rule| {
        let candidate = match rule {
            Envelope::Key(key) => body.get(key),
            Envelope::Root => Some(body),
        };
        candidate.filter(|v| !v.is_null())
    })
}

/// Extract and deserialize a single entity.
pub fn entity<T: DeserializeOwned>(
    body: &Value,
    rules: &[Envelope],
    expected: &'static str,
) -> Result<T, MalformedResponse> {
    let value = locate(body, rules).ok_or_else(|| {
        MalformedResponse::new(expected, format!("no value at any of {}", describe(rules)))
    })?;
    if !value.is_object() {
        return Err(MalformedResponse::new(
            expected,
            format!("found {} instead of an object", kind(value)),
        ));
    }
    T::deserialize(value).map_err(|e| MalformedResponse::new(expected, e.to_string()))
}

/// Extract a list: a bare array first, then a paginator's `data` array.
pub fn list<T: DeserializeOwned>(body: &Value, expected: &'static str) -> Result<Page<T>, MalformedResponse> {
    let (items, meta) = match body {
        Value::Array(_) => (body, None),
        Value::Object(map) => match map.get("data") {
            Some(data @ Value::Array(_)) => (data, paginator_meta(body)),
            Some(other) => {
                return Err(MalformedResponse::new(
                    expected,
                    format!("`data` is {} instead of an array", kind(other)),
                ))
            }
            None => {
                return Err(MalformedResponse::new(expected, "object without a `data` array"))
            }
        },
        other => {
            return Err(MalformedResponse::new(
                expected,
                format!("found {} instead of an array", kind(other)),
            ))
        }
    };

    let items = Vec::<T>::deserialize(items).map_err(|e| MalformedResponse::new(expected, e.to_string()))?;
    Ok(Page { items, meta })
}

/// Extract a bare array (public endpoints never paginate).
pub fn array<T: DeserializeOwned>(body: &Value, expected: &'static str) -> Result<Vec<T>, MalformedResponse> {
    if !body.is_array() {
        return Err(MalformedResponse::new(
            expected,
            format!("found {} instead of an array", kind(body)),
        ));
    }
    Vec::<T>::deserialize(body).map_err(|e| MalformedResponse::new(expected, e.to_string()))
}

/// The session token from a login response.
pub fn token(body: &Value) -> Result<String, MalformedResponse> {
    match body.get("token") {
        Some(Value::String(token)) if !token.is_empty() => Ok(token.clone()),
        Some(other) => Err(MalformedResponse::new(
            "login response",
            format!("`token` is {} instead of a non-empty string", kind(other)),
        )),
        None => Err(MalformedResponse::new("login response", "missing `token`")),
    }
}

fn paginator_meta(body: &Value) -> Option<PageMeta> {
    // Only treat it as a paginator when the Laravel fields are all there
    PageMeta::deserialize(body).ok()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn describe(rules: &[Envelope]) -> String {
    rules
        .iter()
        .map(|rule| match rule {
            Envelope::Key(key) => format!("`{}`", key),
            Envelope::Root => "root".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: i64,
    }

    const WRITE_RULES: &[Envelope] = &[Envelope::Key("product"), Envelope::Key("data"), Envelope::Root];

    #[test]
    fn test_entity_prefers_named_key() {
        let body = json!({"product": {"id": 1}, "data": {"id": 2}, "id": 3});
        let thing: Thing = entity(&body, WRITE_RULES, "product").unwrap();
        assert_eq!(thing, Thing { id: 1 });
    }

    #[test]
    fn test_entity_falls_through_null_keys() {
        let body = json!({"product": null, "data": {"id": 2}});
        let thing: Thing = entity(&body, WRITE_RULES, "product").unwrap();
        assert_eq!(thing, Thing { id: 2 });
    }

    #[test]
    fn test_entity_uses_root_last() {
        let body = json!({"id": 3, "name": "x"});
        let thing: Thing = entity(&body, WRITE_RULES, "product").unwrap();
        assert_eq!(thing, Thing { id: 3 });
    }

    #[test]
    fn test_entity_without_root_rule_is_malformed() {
        let body = json!({"id": 3});
        let err = entity::<Thing>(&body, &[Envelope::Key("category")], "category").unwrap_err();
        assert_eq!(err.expected, "category");
        assert!(err.detail.contains("`category`"));
    }

    #[test]
    fn test_entity_wrong_shape_is_malformed() {
        let body = json!({"product": {"name": "no id"}});
        assert!(entity::<Thing>(&body, WRITE_RULES, "product").is_err());

        let body = json!({"product": [1, 2]});
        let err = entity::<Thing>(&body, WRITE_RULES, "product").unwrap_err();
        assert!(err.detail.contains("an array"));
    }

    #[test]
    fn test_list_accepts_bare_array() {
        let page: Page<Thing> = list(&json!([{"id": 1}, {"id": 2}]), "things").unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.meta.is_none());
    }

    #[test]
    fn test_list_accepts_paginator() {
        let body = json!({
            "data": [{"id": 1}],
            "current_page": 2,
            "last_page": 5,
            "per_page": 1,
            "total": 5
        });
        let page: Page<Thing> = list(&body, "things").unwrap();
        assert_eq!(page.items, vec![Thing { id: 1 }]);
        let meta = page.meta.unwrap();
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.last_page, 5);
        assert_eq!(meta.total, 5);
    }

    #[test]
    fn test_list_data_without_paginator_fields() {
        let page: Page<Thing> = list(&json!({"data": []}), "things").unwrap();
        assert!(page.items.is_empty());
        assert!(page.meta.is_none());
    }

    #[test]
    fn test_list_rejects_other_shapes() {
        assert!(list::<Thing>(&json!({"items": []}), "things").is_err());
        assert!(list::<Thing>(&json!({"data": {"id": 1}}), "things").is_err());
        assert!(list::<Thing>(&json!("nope"), "things").is_err());
    }

    #[test]
    fn test_array_requires_array() {
        assert_eq!(array::<Thing>(&json!([{"id": 7}]), "things").unwrap(), vec![Thing { id: 7 }]);
        assert!(array::<Thing>(&json!({"data": []}), "things").is_err());
    }

    #[test]
    fn test_token() {
        assert_eq!(token(&json!({"token": "1|abc", "user": {}})).unwrap(), "1|abc");
        assert!(token(&json!({"token": ""})).is_err());
        assert!(token(&json!({"token": 5})).is_err());
        assert!(token(&json!({"access_token": "x"})).is_err());
    }
}
