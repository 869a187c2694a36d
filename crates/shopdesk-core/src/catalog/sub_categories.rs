use serde_json::Value;
use tracing::info;

use crate::api::parse::{self, Envelope};
use crate::api::{ApiClient, ApiError, FormFields, Upload};
use crate::models::{Page, SubCategory};

const ADMIN_PATH: &str = "/admin/sub-categories";

const WRITE_RESPONSE: &[Envelope] = &[
    Envelope::Key("sub_category"),
    Envelope::Key("data"),
    Envelope::Root,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubCategoryFilter {
    pub q: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategoryDraft {
    pub category_id: i64,
    pub name: String,
    pub active: bool,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubCategoryPatch {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub image: Option<Upload>,
}

impl SubCategoryDraft {
    pub(crate) fn into_fields(self) -> FormFields {
        FormFields::new()
            .id("category_id", self.category_id)
            .text("name", self.name)
            .flag("is_active", self.active)
            .file("image", self.image)
    }
}

impl SubCategoryPatch {
    pub(crate) fn into_fields(self) -> FormFields {
        FormFields::new()
            .opt_id("category_id", self.category_id)
            .opt_text("name", self.name)
            .opt_flag("is_active", self.active)
            .file("image", self.image)
            .put()
    }
}

pub struct SubCategories<'a> {
    api: &'a ApiClient,
}

impl<'a> SubCategories<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &SubCategoryFilter) -> Result<Page<SubCategory>, ApiError> {
        let query = [
            ("q", filter.q.clone()),
            ("category_id", filter.category_id.map(|id| id.to_string())),
        ];
        let body = self.api.get_json(ADMIN_PATH, &query).await?;
        Ok(parse::list(&body, "sub-category list")?)
    }

    pub async fn create(&self, draft: SubCategoryDraft) -> Result<SubCategory, ApiError> {
        let form = draft.into_fields().into_form()?;
        let body = self.api.post_multipart(ADMIN_PATH, form).await?;
        let sub: SubCategory = parse::entity(&body, WRITE_RESPONSE, "sub-category")?;
        info!(id = sub.id, "Sub-category created");
        Ok(sub)
    }

    pub async fn update(&self, id: i64, patch: SubCategoryPatch) -> Result<SubCategory, ApiError> {
        let form = patch.into_fields().into_form()?;
        let body = self
            .api
            .post_multipart(&format!("{}/{}", ADMIN_PATH, id), form)
            .await?;
        let sub: SubCategory = parse::entity(&body, WRITE_RESPONSE, "sub-category")?;
        info!(id, "Sub-category updated");
        Ok(sub)
    }

    pub async fn delete(&self, id: i64) -> Result<Value, ApiError> {
        let body = self.api.delete_json(&format!("{}/{}", ADMIN_PATH, id)).await?;
        info!(id, "Sub-category deleted");
        Ok(body)
    }
}
