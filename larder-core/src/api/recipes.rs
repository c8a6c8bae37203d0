use super::ApiClient;
use crate::error::ClientError;
use crate::http::{ApiRequest, MultipartForm};
use crate::models::{NewRecipe, PageRequest, PageResponse, Recipe, RecipeUpdate};

/// `/recipe` and `/recipes` endpoints.
pub struct RecipesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RecipesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a recipe under a sub-category. Sent as multipart with the image as "file".
    pub async fn create(
        &self,
        sub_category_id: i64,
        recipe: NewRecipe,
    ) -> Result<Recipe, ClientError> {
        let form = MultipartForm::new()
            .text("title", &recipe.title)
            .text("description", &recipe.description)
            .text("difficulty", recipe.difficulty)
            .text("cookingTime", recipe.cooking_time)
            .file(recipe.image);

        let request = ApiRequest::post(["recipe", "create"])
            .segment(sub_category_id)
            .multipart(form);
        self.client.call(request).await
    }

    /// Update a recipe. The image part is only sent when a new one is given.
    pub async fn update(
        &self,
        recipe_id: i64,
        update: RecipeUpdate,
    ) -> Result<Recipe, ClientError> {
        let form = MultipartForm::new()
            .text("title", &update.title)
            .text("description", &update.description)
            .text("difficulty", update.difficulty)
            .text("cookingTime", update.cooking_time)
            .text("subCategoryId", update.sub_category_id)
            .optional_file(update.image);

        let request = ApiRequest::put(["recipe", "update"])
            .segment(recipe_id)
            .multipart(form);
        self.client.call(request).await
    }

    pub async fn list(&self, page: PageRequest) -> Result<PageResponse<Recipe>, ClientError> {
        let request = ApiRequest::get(["recipes"])
            .query("page", page.page)
            .query("size", page.size);
        self.client.call(request).await
    }

    pub async fn list_by_sub_category(
        &self,
        sub_category_id: i64,
        page: PageRequest,
    ) -> Result<PageResponse<Recipe>, ClientError> {
        let request = ApiRequest::get(["recipe", "subCategory"])
            .segment(sub_category_id)
            .query("page", page.page)
            .query("size", page.size);
        self.client.call(request).await
    }

    /// Keyword search. The keyword is sent as a path segment, unfiltered.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Recipe>, ClientError> {
        let request = ApiRequest::get(["recipe", "findByKeyWord"]).segment(keyword);
        self.client.call(request).await
    }

    /// Flip the recipe between published and hidden.
    pub async fn toggle_status(&self, recipe_id: i64) -> Result<Recipe, ClientError> {
        let request = ApiRequest::post(["recipe", "changeStatus"]).segment(recipe_id);
        self.client.call(request).await
    }

    pub async fn delete(&self, recipe_id: i64) -> Result<String, ClientError> {
        let request = ApiRequest::delete(["recipe", "deleteRecipe"]).segment(recipe_id);
        self.client.call_text(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::signed_in_client as client;
    use crate::http::{Method, MockTransport, RequestBody};
    use crate::models::Difficulty;
    use crate::upload::Upload;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn recipe_json(id: i64) -> Value {
        json!({
            "id": id,
            "title": format!("Recipe {}", id),
            "description": "",
            "cookingTime": 20,
            "difficulty": "EASY",
            "likes": 0,
            "status": true
        })
    }

    fn page_json(number: u32, total_elements: u64, size: u32) -> Value {
        let total_pages = total_elements.div_ceil(size as u64) as u32;
        let on_page = (total_elements - (number as u64 * size as u64)).min(size as u64);
        let content: Vec<Value> = (0..on_page as i64).map(recipe_json).collect();
        json!({
            "content": content,
            "totalElements": total_elements,
            "totalPages": total_pages,
            "size": size,
            "number": number,
            "first": number == 0,
            "last": number + 1 == total_pages
        })
    }

    fn multipart_of(mock: &MockTransport) -> MultipartForm {
        match mock.last_call().unwrap().body {
            RequestBody::Multipart(form) => form,
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_first_page() {
        let mock = MockTransport::new().with_result(Method::GET, "/recipes", page_json(0, 25, 10));
        let mock = Arc::new(mock);
        let api = client(mock.clone());

        let page = api.recipes().list(PageRequest::new(0, 10)).await.unwrap();
        assert!(page.first);
        assert!(!page.last);
        assert_eq!(page.len(), 10);
        assert!(page.is_consistent());

        let call = mock.last_call().unwrap();
        assert_eq!(
            call.query,
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_list_last_page() {
        let mock = MockTransport::new().with_result(Method::GET, "/recipes", page_json(2, 25, 10));
        let api = client(Arc::new(mock));

        let page = api.recipes().list(PageRequest::new(2, 10)).await.unwrap();
        assert!(page.last);
        assert_eq!(page.len(), 5);
        assert!(page.next_page().is_none());
    }

    #[tokio::test]
    async fn test_create_is_multipart_with_file() {
        let mock = MockTransport::new()
            .with_result(Method::POST, "/recipe/create/3", recipe_json(1));
        let mock = Arc::new(mock);
        let recipe = NewRecipe {
            title: "Shakshuka".to_string(),
            description: "Eggs in spiced tomato".to_string(),
            difficulty: Difficulty::Medium,
            cooking_time: 35,
            image: Upload::new("shakshuka.png", vec![1, 2, 3]),
        };

        let api = client(mock.clone());
        api.recipes().create(3, recipe).await.unwrap();

        let form = multipart_of(&mock);
        assert_eq!(form.field("title"), Some("Shakshuka"));
        assert_eq!(form.field("difficulty"), Some("MEDIUM"));
        assert_eq!(form.field("cookingTime"), Some("35"));
        assert_eq!(form.file.unwrap().file_name, "shakshuka.png");
    }

    #[tokio::test]
    async fn test_update_without_image_omits_file() {
        let mock = MockTransport::new()
            .with_result(Method::PUT, "/recipe/update/9", recipe_json(9));
        let mock = Arc::new(mock);
        let update = RecipeUpdate {
            title: "Shakshuka".to_string(),
            description: "Now with feta".to_string(),
            difficulty: Difficulty::Easy,
            cooking_time: 30,
            sub_category_id: 4,
            image: None,
        };

        let api = client(mock.clone());
        api.recipes().update(9, update).await.unwrap();

        let form = multipart_of(&mock);
        assert_eq!(form.field("subCategoryId"), Some("4"));
        assert!(form.file.is_none());
    }

    #[tokio::test]
    async fn test_search_by_sub_category_toggle_and_delete() {
        let search_path = "/recipe/findByKeyWord/green curry";
        let deleted = json!("Recipe deleted");
        let mock = MockTransport::new()
            .with_result(Method::GET, search_path, json!([recipe_json(1)]))
            .with_result(Method::GET, "/recipe/subCategory/4", page_json(0, 3, 10))
            .with_result(Method::POST, "/recipe/changeStatus/1", recipe_json(1))
            .with_result(Method::DELETE, "/recipe/deleteRecipe/1", deleted);
        let mock = Arc::new(mock);
        let api = client(mock.clone());

        assert_eq!(api.recipes().search("green curry").await.unwrap().len(), 1);
        let page = api
            .recipes()
            .list_by_sub_category(4, PageRequest::default())
            .await
            .unwrap();
        assert!(page.first && page.last);
        api.recipes().toggle_status(1).await.unwrap();
        assert_eq!(api.recipes().delete(1).await.unwrap(), "Recipe deleted");
        assert_eq!(mock.call_count(), 4);
    }

    #[tokio::test]
    async fn test_unparseable_error_mentions_status() {
        let mock = MockTransport::new()
            .with_status(Method::GET, "/recipes", 500, "Internal Server Error");
        let api = client(Arc::new(mock));

        let err = api.recipes().list(PageRequest::default()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
