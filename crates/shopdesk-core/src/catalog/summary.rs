use futures::try_join;
use serde::Serialize;

use crate::api::{ApiClient, ApiError};

use super::{CategoryFilter, ProductFilter, SubCategoryFilter};

/// Entity counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub categories: u64,
    pub sub_categories: u64,
    pub products: u64,
}

impl ApiClient {
    /// Fetch the three admin lists concurrently and count them.
    /// Paginated lists report the paginator total.
    pub async fn summary(&self) -> Result<CatalogSummary, ApiError> {
        let categories = self.categories();
        let sub_categories = self.sub_categories();
        let products = self.products();

        let category_filter = CategoryFilter::default();
        let sub_category_filter = SubCategoryFilter::default();
        let product_filter = ProductFilter::default();

        let (categories, sub_categories, products) = try_join!(
            categories.list(&category_filter),
            sub_categories.list(&sub_category_filter),
            products.list(&product_filter),
        )?;

        Ok(CatalogSummary {
            categories: categories.total(),
            sub_categories: sub_categories.total(),
            products: products.total(),
        })
    }
}
