//! Typed resource clients for the backend API.
//!
//! All clients share [`ApiClient`]: requests go through the
//! [`AuthProvider`], and responses are unwrapped from the backend envelope.
//! Nothing is cached or retried; every call is a fresh round trip.

mod categories;
mod envelope;
mod ingredients;
mod recipe_ingredients;
mod recipe_steps;
mod recipes;

pub use categories::CategoriesApi;
pub use envelope::Envelope;
pub use ingredients::IngredientsApi;
pub use recipe_ingredients::RecipeIngredientsApi;
pub use recipe_steps::RecipeStepsApi;
pub use recipes::RecipesApi;

pub(crate) use envelope::error_from_response;

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{ApiRequest, HttpTransport, ReqwestTransport};

/// Entry point for all resource clients.
#[derive(Clone)]
pub struct ApiClient {
    auth: Arc<AuthProvider>,
}

impl ApiClient {
    pub fn new(auth: Arc<AuthProvider>) -> Self {
        Self { auth }
    }

    /// Build a reqwest-backed client with session and revoker from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(config)?);
        let auth = AuthProvider::from_config(config, transport);
        Ok(Self::new(Arc::new(auth)))
    }

    pub fn auth(&self) -> &Arc<AuthProvider> {
        &self.auth
    }

    pub fn ingredients(&self) -> IngredientsApi<'_> {
        IngredientsApi::new(self)
    }

    pub fn recipes(&self) -> RecipesApi<'_> {
        RecipesApi::new(self)
    }

    pub fn recipe_ingredients(&self) -> RecipeIngredientsApi<'_> {
        RecipeIngredientsApi::new(self)
    }

    pub fn recipe_steps(&self) -> RecipeStepsApi<'_> {
        RecipeStepsApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    /// Send an authorized request and unwrap `result` as `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let method = request.method.clone();
        let path = request.path();
        let response = self.auth.authorized_request(request).await?;
        let result = envelope::decode(&response);
        if let Err(e) = &result {
            tracing::warn!(%method, path = %path, error = %e, "api call failed");
        }
        result
    }

    /// Send an authorized request whose `result` is a confirmation string.
    pub(crate) async fn call_text(&self, request: ApiRequest) -> Result<String, ClientError> {
        let method = request.method.clone();
        let path = request.path();
        let response = self.auth.authorized_request(request).await?;
        let result = envelope::decode_text(&response);
        if let Err(e) = &result {
            tracing::warn!(%method, path = %path, error = %e, "api call failed");
        }
        result
    }
}

#[cfg(test)]
pub(crate) fn signed_in_client(mock: Arc<crate::http::MockTransport>) -> ApiClient {
    let session = Arc::new(crate::auth::Session::with_token(Some("tok".to_string())));
    ApiClient::new(Arc::new(AuthProvider::new(session, mock)))
}
