use serde::{Deserialize, Serialize};

/// Main category with the sub-categories it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    #[serde(alias = "categoryName")]
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

impl Category {
    /// Sum of the sub-categories' recipe counts, treating missing counts as zero.
    pub fn recipe_count(&self) -> u64 {
        self.sub_categories
            .iter()
            .filter_map(|s| s.recipe_count)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: i64,
    #[serde(alias = "subCategoryName")]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Aggregated by the backend; informational only.
    #[serde(default)]
    pub recipe_count: Option<u64>,
}

/// Sub-category reference embedded in a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryRef {
    pub id: i64,
    #[serde(default, alias = "subCategoryName")]
    pub name: Option<String>,
}
