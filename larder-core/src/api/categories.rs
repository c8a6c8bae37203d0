use super::ApiClient;
use crate::error::ClientError;
use crate::http::ApiRequest;
use crate::models::{Category, SubCategory};

/// Read-only category hierarchy.
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Main categories with their sub-categories.
    pub async fn list(&self) -> Result<Vec<Category>, ClientError> {
        self.client
            .call(ApiRequest::get(["categories", "getAll"]))
            .await
    }

    pub async fn sub_categories(&self, category_id: i64) -> Result<Vec<SubCategory>, ClientError> {
        let request = ApiRequest::get(["subCategories", "getByCategory"]).segment(category_id);
        self.client.call(request).await
    }
}
