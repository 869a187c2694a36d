use serde_json::Value;
use tracing::info;

use crate::api::parse::{self, Envelope};
use crate::api::{ApiClient, ApiError, FormFields, Upload};
use crate::models::{Category, Page};

const ADMIN_PATH: &str = "/admin/categories";
const PUBLIC_PATH: &str = "/categories";

/// Category writes answer with `{"category": {...}}` only.
const WRITE_RESPONSE: &[Envelope] = &[Envelope::Key("category")];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub q: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub active: bool,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub image: Option<Upload>,
}

impl CategoryDraft {
    pub(crate) fn into_fields(self) -> FormFields {
        FormFields::new()
            .text("name", self.name)
            .flag("is_active", self.active)
            .file("image", self.image)
    }
}

impl CategoryPatch {
    pub(crate) fn into_fields(self) -> FormFields {
        FormFields::new()
            .opt_text("name", self.name)
            .opt_flag("is_active", self.active)
            .file("image", self.image)
            .put()
    }
}

pub struct Categories<'a> {
    api: &'a ApiClient,
}

impl<'a> Categories<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &CategoryFilter) -> Result<Page<Category>, ApiError> {
        let query = [
            ("q", filter.q.clone()),
            ("page", filter.page.map(|p| p.to_string())),
        ];
        let body = self.api.get_json(ADMIN_PATH, &query).await?;
        Ok(parse::list(&body, "category list")?)
    }

    pub async fn create(&self, draft: CategoryDraft) -> Result<Category, ApiError> {
        let form = draft.into_fields().into_form()?;
        let body = self.api.post_multipart(ADMIN_PATH, form).await?;
        let category: Category = parse::entity(&body, WRITE_RESPONSE, "category")?;
        info!(id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: i64, patch: CategoryPatch) -> Result<Category, ApiError> {
        let form = patch.into_fields().into_form()?;
        let body = self
            .api
            .post_multipart(&format!("{}/{}", ADMIN_PATH, id), form)
            .await?;
        let category: Category = parse::entity(&body, WRITE_RESPONSE, "category")?;
        info!(id, "Category updated");
        Ok(category)
    }

    /// Delete a category; the backend's acknowledgement is returned as is
    pub async fn delete(&self, id: i64) -> Result<Value, ApiError> {
        let body = self.api.delete_json(&format!("{}/{}", ADMIN_PATH, id)).await?;
        info!(id, "Category deleted");
        Ok(body)
    }

    /// Public (storefront) category list
    pub async fn public(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.api.get_json(PUBLIC_PATH, &[]).await?;
        Ok(parse::array(&body, "public category list")?)
    }
}
