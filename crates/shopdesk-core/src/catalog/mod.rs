//! Catalog administration services.
//!
//! Each service borrows the shared `ApiClient`, so every call carries the
//! session token and a 401 anywhere ends the session:
//!
//! ```ignore
//! let page = api.categories().list(&CategoryFilter::default()).await?;
//! ```

pub mod categories;
pub mod products;
pub mod sub_categories;
pub mod summary;

use crate::api::ApiClient;

pub use categories::{Categories, CategoryDraft, CategoryFilter, CategoryPatch};
pub use products::{ProductDraft, ProductFilter, ProductPatch, Products};
pub use sub_categories::{SubCategories, SubCategoryDraft, SubCategoryFilter, SubCategoryPatch};
pub use summary::CatalogSummary;

impl ApiClient {
    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    pub fn sub_categories(&self) -> SubCategories<'_> {
        SubCategories::new(self)
    }

    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }
}
