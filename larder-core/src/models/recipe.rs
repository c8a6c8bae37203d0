use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::SubCategoryRef;
use crate::upload::Upload;

/// Recipe difficulty as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &'static [Difficulty] =
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown difficulty {:?}", wanted))
    }
}

/// Recipe author as embedded in recipe responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Image URL served by the backend.
    #[serde(default)]
    pub image: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Published (true) or hidden (false); flipped by the status toggle.
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub sub_category: Option<SubCategoryRef>,
    #[serde(default, alias = "author")]
    pub user: Option<Author>,
}

/// Fields for creating a recipe. The image is mandatory on creation.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub cooking_time: u32,
    pub image: Upload,
}

/// Fields for updating a recipe. A new image replaces the old one only when present.
#[derive(Debug, Clone)]
pub struct RecipeUpdate {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub cooking_time: u32,
    pub sub_category_id: i64,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: i64,
    /// Ordinal position within the recipe, unique per recipe.
    pub step: u32,
    #[serde(default)]
    pub recipe_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    /// Minutes to wait after this step, if any.
    #[serde(default)]
    pub waiting_time: Option<u32>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Multipart fields shared by step creation and update.
#[derive(Debug, Clone)]
pub struct StepForm {
    pub step: u32,
    pub description: String,
    pub waiting_time: Option<u32>,
    pub image: Option<Upload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" Hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_recipe_deserializes_backend_shape() {
        let json = serde_json::json!({
            "id": 7,
            "title": "Pho",
            "description": "Beef noodle soup",
            "image": "http://localhost:8080/images/pho.png",
            "cookingTime": 180,
            "difficulty": "HARD",
            "likes": 12,
            "createdAt": "2024-03-01T18:30:00",
            "status": true,
            "subCategory": { "id": 3, "name": "Soups" },
            "user": { "id": 1, "fullName": "Admin User" }
        });
        let recipe: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Hard);
        assert_eq!(recipe.cooking_time, 180);
        assert_eq!(recipe.sub_category.unwrap().id, 3);
        assert_eq!(recipe.user.unwrap().full_name.as_deref(), Some("Admin User"));
        assert!(recipe.created_at.is_some());
    }

    #[test]
    fn test_recipe_optional_fields_default() {
        let json = serde_json::json!({ "id": 1, "title": "Toast", "difficulty": "EASY" });
        let recipe: Recipe = serde_json::from_value(json).unwrap();
        assert!(recipe.image.is_none());
        assert!(recipe.sub_category.is_none());
        assert!(recipe.user.is_none());
        assert!(!recipe.status);
    }
}
