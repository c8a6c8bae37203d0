use super::ApiClient;
use crate::error::ClientError;
use crate::http::ApiRequest;
use crate::models::{
    NewRecipeIngredient, RecipeIngredient, RecipeIngredientKey, RecipeIngredientUpdate,
};

/// `/recipeIngredients` endpoints. Rows are addressed by (recipe id, ingredient id).
pub struct RecipeIngredientsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RecipeIngredientsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, row: &NewRecipeIngredient) -> Result<RecipeIngredient, ClientError> {
        let request = ApiRequest::post(["recipeIngredients", "create"]).json(row)?;
        self.client.call(request).await
    }

    /// Change the quantity of an ingredient in a recipe.
    pub async fn update(
        &self,
        key: RecipeIngredientKey,
        quantity: f64,
    ) -> Result<RecipeIngredient, ClientError> {
        let body = RecipeIngredientUpdate {
            ingredient_id: key.ingredient_id(),
            quantity,
        };
        let request = ApiRequest::put(["recipeIngredients", "update"])
            .segment(key.recipe_id())
            .segment(key.ingredient_id())
            .json(&body)?;
        self.client.call(request).await
    }

    pub async fn list(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>, ClientError> {
        let request =
            ApiRequest::get(["recipeIngredients", "getAllRecipeIngredients"]).segment(recipe_id);
        self.client.call(request).await
    }

    pub async fn delete(&self, key: RecipeIngredientKey) -> Result<String, ClientError> {
        let request = ApiRequest::delete(["recipeIngredients", "delete"])
            .segment(key.recipe_id())
            .segment(key.ingredient_id());
        self.client.call_text(request).await
    }
}
