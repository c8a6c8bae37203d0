use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i64,
    pub ingredient_name: String,
    #[serde(default)]
    pub calories_per_unit: f64,
}

/// JSON body for ingredient create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientForm {
    pub ingredient_name: String,
    pub calories_per_unit: f64,
}

/// An ingredient used by a recipe, with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    #[serde(default)]
    pub ingredient_name: Option<String>,
    #[serde(default)]
    pub calories_per_unit: Option<f64>,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
}

/// JSON body for a quantity change; the ingredient id is echoed from the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientUpdate {
    pub ingredient_id: i64,
    pub quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_serializes_camel_case() {
        let form = IngredientForm {
            ingredient_name: "Butter".to_string(),
            calories_per_unit: 7.2,
        };
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            serde_json::json!({ "ingredientName": "Butter", "caloriesPerUnit": 7.2 })
        );
    }
}
