use serde_json::Value;
use tracing::info;

use crate::api::parse::{self, Envelope};
use crate::api::{ApiClient, ApiError, FormFields, Upload};
use crate::models::{Page, Product};

const ADMIN_PATH: &str = "/admin/products";

const WRITE_RESPONSE: &[Envelope] = &[
    Envelope::Key("product"),
    Envelope::Key("data"),
    Envelope::Root,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub q: Option<String>,
    pub sub_category_id: Option<i64>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub sub_category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub thumbnail: Option<Upload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub sub_category_id: Option<i64>,
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub active: Option<bool>,
    pub thumbnail: Option<Upload>,
}

impl ProductDraft {
    pub(crate) fn into_fields(self) -> FormFields {
        FormFields::new()
            .id("sub_category_id", self.sub_category_id)
            .text("name", self.name)
            .opt_text("description", self.description)
            .flag("is_active", self.active)
            .file("thumbnail", self.thumbnail)
    }
}

impl ProductPatch {
    pub(crate) fn into_fields(self) -> FormFields {
        FormFields::new()
            .opt_id("sub_category_id", self.sub_category_id)
            .opt_text("name", self.name)
            .opt_text("description", self.description.map(Option::unwrap_or_default))
            .opt_flag("is_active", self.active)
            .file("thumbnail", self.thumbnail)
            .put()
    }
}

pub struct Products<'a> {
    api: &'a ApiClient,
}

impl<'a> Products<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &ProductFilter) -> Result<Page<Product>, ApiError> {
        let query = [
            ("q", filter.q.clone()),
            ("sub_category_id", filter.sub_category_id.map(|id| id.to_string())),
            ("page", filter.page.map(|p| p.to_string())),
        ];
        let body = self.api.get_json(ADMIN_PATH, &query).await?;
        Ok(parse::list(&body, "product list")?)
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        let form = draft.into_fields().into_form()?;
        let body = self.api.post_multipart(ADMIN_PATH, form).await?;
        let product: Product = parse::entity(&body, WRITE_RESPONSE, "product")?;
        info!(id = product.id, "Product created");
        Ok(product)
    }

    pub async fn update(&self, id: i64, patch: ProductPatch) -> Result<Product, ApiError> {
        let form = patch.into_fields().into_form()?;
        let body = self
            .api
            .post_multipart(&format!("{}/{}", ADMIN_PATH, id), form)
            .await?;
        let product: Product = parse::entity(&body, WRITE_RESPONSE, "product")?;
        info!(id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: i64) -> Result<Value, ApiError> {
        let body = self.api.delete_json(&format!("{}/{}", ADMIN_PATH, id)).await?;
        info!(id, "Product deleted");
        Ok(body)
    }

    /// Public products of one sub-category
    pub async fn by_sub_category(&self, sub_category_id: i64) -> Result<Vec<Product>, ApiError> {
        let path = format!("/sub-categories/{}/products", sub_category_id);
        let body = self.api.get_json(&path, &[]).await?;
        Ok(parse::array(&body, "public product list")?)
    }

    /// Public product detail
    pub async fn public(&self, id: i64) -> Result<Product, ApiError> {
        let body = self.api.get_json(&format!("/products/{}", id), &[]).await?;
        Ok(parse::entity(&body, &[Envelope::Root], "product")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_without_description_omits_field() {
        let fields = ProductDraft {
            sub_category_id: 9,
            name: "Runner".to_string(),
            description: None,
            active: true,
            thumbnail: Some(Upload::new("runner.jpg", vec![1])),
        }
        .into_fields();

        assert_eq!(fields.get("sub_category_id"), Some("9"));
        assert_eq!(fields.get("description"), None);
        assert_eq!(fields.files()[0].0, "thumbnail");
    }

    #[test]
    fn test_patch_clearing_description_sends_empty_string() {
        let fields = ProductPatch {
            description: Some(None),
            ..Default::default()
        }
        .into_fields();

        assert_eq!(fields.get("description"), Some(""));
        assert_eq!(fields.get("_method"), Some("PUT"));
    }

    #[test]
    fn test_patch_untouched_description_is_omitted() {
        let fields = ProductPatch {
            name: Some("Trail Runner".to_string()),
            ..Default::default()
        }
        .into_fields();

        assert_eq!(fields.get("description"), None);
        assert_eq!(fields.get("name"), Some("Trail Runner"));
    }
}
