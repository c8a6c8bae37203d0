//! Wire records for the backend API.
//!
//! Everything here is a transient copy of backend-owned state. Field names
//! follow the backend's camelCase JSON.

mod category;
mod ingredient;
mod keys;
mod page;
mod recipe;

pub use category::{Category, SubCategory, SubCategoryRef};
pub use ingredient::{
    Ingredient, IngredientForm, NewRecipeIngredient, RecipeIngredient, RecipeIngredientUpdate,
};
pub use keys::{RecipeIngredientKey, RecipeStepKey};
pub use page::{PageRequest, PageResponse};
pub use recipe::{Author, Difficulty, NewRecipe, Recipe, RecipeStep, RecipeUpdate, StepForm};
