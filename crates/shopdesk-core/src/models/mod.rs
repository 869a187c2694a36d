//! Data models for the catalog backend.
//!
//! - `User`: the authenticated identity returned by `/auth/me`
//! - `Category`, `SubCategory`, `Product`: catalog entities
//! - `Page`, `PageMeta`: list results, optionally paginated
//!
//! Field names follow the backend's snake_case JSON. The backend's
//! `is_active` column is exposed as `active`.

pub mod catalog;
pub mod page;
pub mod user;

pub use catalog::{Category, Product, SubCategory};
pub use page::{Page, PageMeta};
pub use user::User;

/// Deserialize a loosely typed boolean column.
///
/// Accepts JSON booleans, numbers (`0` is false), and strings (`""`, `"0"`
/// and `"false"` are false). Missing or null reads as false.
pub(crate) fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}
