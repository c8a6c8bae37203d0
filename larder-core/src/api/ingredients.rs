use super::ApiClient;
use crate::error::ClientError;
use crate::http::ApiRequest;
use crate::models::{Ingredient, IngredientForm};

/// `/ingredients` endpoints.
pub struct IngredientsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> IngredientsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, form: &IngredientForm) -> Result<Ingredient, ClientError> {
        let request = ApiRequest::post(["ingredients", "create"]).json(form)?;
        self.client.call(request).await
    }

    pub async fn update(&self, id: i64, form: &IngredientForm) -> Result<Ingredient, ClientError> {
        let request = ApiRequest::put(["ingredients", "update"])
            .segment(id)
            .json(form)?;
        self.client.call(request).await
    }

    pub async fn list(&self) -> Result<Vec<Ingredient>, ClientError> {
        self.client
            .call(ApiRequest::get(["ingredients", "getAll"]))
            .await
    }

    /// Returns the backend's confirmation text.
    pub async fn delete(&self, id: i64) -> Result<String, ClientError> {
        let request = ApiRequest::delete(["ingredients", "delete"]).segment(id);
        self.client.call_text(request).await
    }
}
