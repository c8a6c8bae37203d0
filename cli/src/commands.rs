//! One method per top-level subcommand. Each maps to a dashboard view: it
//! enters the view's route, calls the resource client and prints the result
//! as JSON on stdout.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use larder_core::models::{
    IngredientForm, NewRecipe, NewRecipeIngredient, PageRequest, RecipeIngredientKey, RecipeStepKey,
    RecipeUpdate, StepForm,
};
use larder_core::views::{dashboard_cards, DashboardStats, LogoutControl, LogoutOutcome, Route};
use larder_core::{ApiClient, ClientConfig, NoopChannel, NotificationLifecycle, Upload};
use serde::Serialize;

use crate::{
    CategoryAction, IngredientAction, RecipeAction, RecipeIngredientAction, RecipeStepAction,
};

pub struct Console {
    client: ApiClient,
    notifications: NotificationLifecycle,
}

impl Console {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = ApiClient::from_config(config).context("Failed to build HTTP client")?;
        // No live updates in a one-shot process.
        let notifications =
            NotificationLifecycle::new(Arc::new(NoopChannel), client.auth().session().clone());
        Ok(Self {
            client,
            notifications,
        })
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Hold the notification channel for `route` until the returned guard drops.
    fn enter(&self, route: Route) -> RouteView<'_> {
        self.notifications.enter_route(route);
        RouteView(&self.notifications)
    }

    pub async fn ingredients(&self, action: IngredientAction) -> Result<()> {
        let api = self.client.ingredients();
        let _view = self.enter(Route::Recipes);
        match action {
            IngredientAction::List => self.print(&api.list().await?),
            IngredientAction::Create { name, calories } => {
                let form = IngredientForm {
                    ingredient_name: name,
                    calories_per_unit: calories,
                };
                self.print(&api.create(&form).await?)
            }
            IngredientAction::Update { id, name, calories } => {
                let form = IngredientForm {
                    ingredient_name: name,
                    calories_per_unit: calories,
                };
                self.print(&api.update(id, &form).await?)
            }
            IngredientAction::Delete { id } => self.print(&api.delete(id).await?),
        }
    }

    pub async fn recipes(&self, action: RecipeAction) -> Result<()> {
        let api = self.client.recipes();
        let _view = self.enter(Route::Recipes);
        match action {
            RecipeAction::List {
                page,
                size,
                sub_category,
            } => {
                let page = PageRequest::new(page, size);
                let recipes = match sub_category {
                    Some(id) => api.list_by_sub_category(id, page).await?,
                    None => api.list(page).await?,
                };
                self.print(&recipes)
            }
            RecipeAction::Search { keyword } => self.print(&api.search(&keyword).await?),
            RecipeAction::Create {
                sub_category,
                title,
                description,
                difficulty,
                cooking_time,
                image,
            } => {
                let recipe = NewRecipe {
                    title,
                    description,
                    difficulty,
                    cooking_time,
                    image: read_upload(&image)?,
                };
                self.print(&api.create(sub_category, recipe).await?)
            }
            RecipeAction::Update {
                id,
                sub_category,
                title,
                description,
                difficulty,
                cooking_time,
                image,
            } => {
                let update = RecipeUpdate {
                    title,
                    description,
                    difficulty,
                    cooking_time,
                    sub_category_id: sub_category,
                    image: image.as_deref().map(read_upload).transpose()?,
                };
                self.print(&api.update(id, update).await?)
            }
            RecipeAction::ToggleStatus { id } => self.print(&api.toggle_status(id).await?),
            RecipeAction::Delete { id } => self.print(&api.delete(id).await?),
        }
    }

    pub async fn recipe_ingredients(&self, action: RecipeIngredientAction) -> Result<()> {
        let api = self.client.recipe_ingredients();
        let _view = self.enter(Route::Recipes);
        match action {
            RecipeIngredientAction::List { recipe } => self.print(&api.list(recipe).await?),
            RecipeIngredientAction::Add {
                recipe,
                ingredient,
                quantity,
            } => {
                let row = NewRecipeIngredient {
                    recipe_id: recipe,
                    ingredient_id: ingredient,
                    quantity,
                };
                self.print(&api.create(&row).await?)
            }
            RecipeIngredientAction::Update {
                recipe,
                ingredient,
                quantity,
            } => {
                let key = RecipeIngredientKey::parse(&recipe, &ingredient)?;
                self.print(&api.update(key, quantity).await?)
            }
            RecipeIngredientAction::Remove { recipe, ingredient } => {
                let key = RecipeIngredientKey::parse(&recipe, &ingredient)?;
                self.print(&api.delete(key).await?)
            }
        }
    }

    pub async fn recipe_steps(&self, action: RecipeStepAction) -> Result<()> {
        let api = self.client.recipe_steps();
        let _view = self.enter(Route::Recipes);
        match action {
            RecipeStepAction::List { recipe } => self.print(&api.list(recipe).await?),
            RecipeStepAction::Add {
                recipe,
                step,
                description,
                waiting_time,
                image,
            } => {
                let form = StepForm {
                    step,
                    description,
                    waiting_time,
                    image: image.as_deref().map(read_upload).transpose()?,
                };
                self.print(&api.create(recipe, form).await?)
            }
            RecipeStepAction::Update {
                recipe,
                step,
                new_step,
                description,
                waiting_time,
                image,
            } => {
                let key = RecipeStepKey::parse(&recipe, &step)?;
                let form = StepForm {
                    step: new_step.unwrap_or(key.step()),
                    description,
                    waiting_time,
                    image: image.as_deref().map(read_upload).transpose()?,
                };
                self.print(&api.update(key, form).await?)
            }
            RecipeStepAction::Delete { id } => self.print(&api.delete(id).await?),
        }
    }

    pub async fn categories(&self, action: CategoryAction) -> Result<()> {
        let api = self.client.categories();
        let _view = self.enter(Route::Categories);
        match action {
            CategoryAction::List => self.print(&api.list().await?),
            CategoryAction::SubCategories { category } => {
                self.print(&api.sub_categories(category).await?)
            }
        }
    }

    pub async fn dashboard(&self, unread: u32) -> Result<()> {
        let _view = self.enter(Route::Dashboard);
        let stats = DashboardStats::fetch(&self.client)
            .await
            .context("Failed to load dashboard totals")?;
        self.print(&dashboard_cards(&stats, unread))
    }

    pub async fn logout(&self) -> Result<()> {
        let control = LogoutControl::new(self.client.auth().clone());
        match control.press().await.context("Logout failed")? {
            LogoutOutcome::SignedOut => tracing::info!("signed out"),
            LogoutOutcome::Ignored => tracing::warn!("logout already in progress"),
        }
        let signed_in = self.client.auth().session().is_active();
        self.print(&serde_json::json!({ "signedIn": signed_in }))
    }
}

struct RouteView<'a>(&'a NotificationLifecycle);

impl Drop for RouteView<'_> {
    fn drop(&mut self) {
        self.0.leave_route();
    }
}

fn read_upload(path: &Path) -> Result<Upload> {
    Upload::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
}
