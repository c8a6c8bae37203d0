use super::ApiClient;
use crate::error::ClientError;
use crate::http::{ApiRequest, MultipartForm};
use crate::models::{RecipeStep, RecipeStepKey, StepForm};

/// `/recipeSteps` endpoints.
pub struct RecipeStepsApi<'a> {
    client: &'a ApiClient,
}

/// Multipart body for step create/update. A missing waiting time is sent as "".
fn step_form(form: StepForm) -> MultipartForm {
    let waiting_time = form
        .waiting_time
        .map(|w| w.to_string())
        .unwrap_or_default();

    MultipartForm::new()
        .text("step", form.step)
        .text("description", form.description)
        .text("waitingTime", waiting_time)
        .optional_file(form.image)
}

impl<'a> RecipeStepsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, recipe_id: i64, form: StepForm) -> Result<RecipeStep, ClientError> {
        let request = ApiRequest::post(["recipeSteps", "create"])
            .segment(recipe_id)
            .multipart(step_form(form));
        self.client.call(request).await
    }

    /// Update the step at `key`. The form's step number may move it.
    pub async fn update(
        &self,
        key: RecipeStepKey,
        form: StepForm,
    ) -> Result<RecipeStep, ClientError> {
        let request = ApiRequest::put(["recipeSteps", "update"])
            .segment(key.recipe_id())
            .segment(key.step())
            .multipart(step_form(form));
        self.client.call(request).await
    }

    pub async fn list(&self, recipe_id: i64) -> Result<Vec<RecipeStep>, ClientError> {
        let request = ApiRequest::get(["recipeSteps", "getAllRecipeSteps"]).segment(recipe_id);
        self.client.call(request).await
    }

    /// Delete by the step's own id.
    pub async fn delete(&self, step_id: i64) -> Result<String, ClientError> {
        let request = ApiRequest::delete(["recipeSteps", "delete"]).segment(step_id);
        self.client.call_text(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::signed_in_client as client;
    use crate::http::{Method, MockTransport, RequestBody};
    use crate::upload::Upload;
    use serde_json::json;
    use std::sync::Arc;

    fn step_json() -> serde_json::Value {
        json!({ "id": 31, "step": 2, "recipeId": 4, "description": "Simmer", "waitingTime": 10 })
    }

    fn sent_form(mock: &MockTransport) -> MultipartForm {
        match mock.last_call().unwrap().body {
            RequestBody::Multipart(form) => form,
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_sends_empty_waiting_time() {
        let mock = MockTransport::new()
            .with_result(Method::POST, "/recipeSteps/create/4", step_json());
        let mock = Arc::new(mock);
        let form = StepForm {
            step: 2,
            description: "Simmer".to_string(),
            waiting_time: None,
            image: None,
        };

        let api = client(mock.clone());
        api.recipe_steps().create(4, form).await.unwrap();

        let sent = sent_form(&mock);
        assert_eq!(sent.field("step"), Some("2"));
        assert_eq!(sent.field("waitingTime"), Some(""));
        assert!(sent.file.is_none());
    }

    #[tokio::test]
    async fn test_update_addresses_recipe_and_step() {
        let mock = MockTransport::new()
            .with_result(Method::PUT, "/recipeSteps/update/4/2", step_json());
        let mock = Arc::new(mock);
        let form = StepForm {
            step: 2,
            description: "Simmer gently".to_string(),
            waiting_time: Some(10),
            image: Some(Upload::new("pot.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])),
        };

        let step = client(mock.clone())
            .recipe_steps()
            .update(RecipeStepKey::new(4, 2), form)
            .await
            .unwrap();

        assert_eq!(step.waiting_time, Some(10));
        let sent = sent_form(&mock);
        assert_eq!(sent.field("waitingTime"), Some("10"));
        assert_eq!(sent.file.unwrap().content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let list_path = "/recipeSteps/getAllRecipeSteps/4";
        let mock = MockTransport::new()
            .with_result(Method::GET, list_path, json!([step_json()]))
            .with_result(Method::DELETE, "/recipeSteps/delete/31", json!(31));
        let mock = Arc::new(mock);
        let api = client(mock);

        assert_eq!(api.recipe_steps().list(4).await.unwrap()[0].step, 2);
        assert_eq!(api.recipe_steps().delete(31).await.unwrap(), "31");
    }
}
