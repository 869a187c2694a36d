//! Catalog entities as the admin API returns them.
//!
//! Image and thumbnail URLs are passed through from the backend untouched.

use serde::{Deserialize, Serialize};

use super::truthy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "is_active", default, deserialize_with = "truthy")]
    pub active: bool,
    /// Stored path on the backend
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SubCategory {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    #[serde(rename = "is_active", default, deserialize_with = "truthy")]
    pub active: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Product {
    pub id: i64,
    pub sub_category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "is_active", default, deserialize_with = "truthy")]
    pub active: bool,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// "Active" / "Inactive" label
pub fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

impl Category {
    pub fn status(&self) -> &'static str {
        status_label(self.active)
    }
}

impl SubCategory {
    pub fn status(&self) -> &'static str {
        status_label(self.active)
    }
}

impl Product {
    pub fn status(&self) -> &'static str {
        status_label(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_category_from_laravel() {
        let category: Category = serde_json::from_value(json!({
            "id": 4,
            "name": "Shoes",
            "is_active": 1,
            "image": "categories/shoes.png",
            "image_url": "http://127.0.0.1:8000/storage/categories/shoes.png",
            "created_at": "2025-01-10T08:30:00.000000Z",
            "updated_at": "2025-01-11T08:30:00.000000Z"
        }))
        .unwrap();
        assert_eq!(category.id, 4);
        assert!(category.active);
        assert_eq!(category.status(), "Active");
        assert_eq!(category.image.as_deref(), Some("categories/shoes.png"));
    }

    #[test]
    fn test_is_active_variants() {
        let parse = |v: serde_json::Value| -> bool {
            let c: Category = serde_json::from_value(json!({"id": 1, "name": "x", "is_active": v})).unwrap();
            c.active
        };
        assert!(parse(json!(true)));
        assert!(parse(json!(1)));
        assert!(parse(json!("1")));
        assert!(parse(json!("true")));
        assert!(!parse(json!(false)));
        assert!(!parse(json!(0)));
        assert!(!parse(json!("0")));
        assert!(!parse(json!("false")));
        assert!(!parse(json!("")));
        assert!(!parse(json!(null)));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let c: Category = serde_json::from_value(json!({"id": 1, "name": "Bare"})).unwrap();
        assert!(!c.active);
        assert_eq!(c.image, None);
        assert_eq!(c.image_url, None);
        assert_eq!(c.created_at, None);
    }

    #[test]
    fn test_parse_sub_category_and_product() {
        let sub: SubCategory = serde_json::from_value(json!({
            "id": 9, "category_id": 4, "name": "Sneakers", "is_active": "1", "image": null
        }))
        .unwrap();
        assert_eq!(sub.category_id, 4);
        assert!(sub.active);
        assert_eq!(sub.image, None);

        let product: Product = serde_json::from_value(json!({
            "id": 30, "sub_category_id": 9, "name": "Runner", "description": null,
            "is_active": 0, "thumbnail": "products/runner.jpg"
        }))
        .unwrap();
        assert_eq!(product.sub_category_id, 9);
        assert!(!product.active);
        assert_eq!(product.status(), "Inactive");
        assert_eq!(product.thumbnail_url, None);
    }

    #[test]
    fn test_product_requires_sub_category() {
        let result = serde_json::from_value::<Product>(json!({"id": 1, "name": "Orphan"}));
        assert!(result.is_err());
    }
}
