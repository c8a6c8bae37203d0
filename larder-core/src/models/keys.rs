//! Composite identifiers.
//!
//! A key can only exist with both parts present. Input that may be missing a
//! part (form fields, CLI arguments) goes through `from_parts` or `parse`,
//! which fail with `ClientError::Validation` before any request is built.

use std::fmt;

use crate::error::ClientError;

/// Identifies a recipe-ingredient row: (recipe id, ingredient id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeIngredientKey {
    recipe_id: i64,
    ingredient_id: i64,
}

impl RecipeIngredientKey {
    pub fn new(recipe_id: i64, ingredient_id: i64) -> Self {
        Self {
            recipe_id,
            ingredient_id,
        }
    }

    pub fn from_parts(
        recipe_id: Option<i64>,
        ingredient_id: Option<i64>,
    ) -> Result<Self, ClientError> {
        let recipe_id = recipe_id.ok_or_else(|| missing("recipe-ingredient", "recipe id"))?;
        let ingredient_id =
            ingredient_id.ok_or_else(|| missing("recipe-ingredient", "ingredient id"))?;
        Ok(Self::new(recipe_id, ingredient_id))
    }

    /// Parse from raw text input. Blank parts count as missing.
    pub fn parse(recipe_id: &str, ingredient_id: &str) -> Result<Self, ClientError> {
        Self::from_parts(
            parse_part("recipe id", recipe_id)?,
            parse_part("ingredient id", ingredient_id)?,
        )
    }

    pub fn recipe_id(&self) -> i64 {
        self.recipe_id
    }

    pub fn ingredient_id(&self) -> i64 {
        self.ingredient_id
    }
}

impl fmt::Display for RecipeIngredientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.recipe_id, self.ingredient_id)
    }
}

/// Identifies a recipe step: (recipe id, step number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeStepKey {
    recipe_id: i64,
    step: u32,
}

impl RecipeStepKey {
    pub fn new(recipe_id: i64, step: u32) -> Self {
        Self { recipe_id, step }
    }

    pub fn from_parts(recipe_id: Option<i64>, step: Option<u32>) -> Result<Self, ClientError> {
        let recipe_id = recipe_id.ok_or_else(|| missing("recipe-step", "recipe id"))?;
        let step = step.ok_or_else(|| missing("recipe-step", "step number"))?;
        Ok(Self::new(recipe_id, step))
    }

    pub fn parse(recipe_id: &str, step: &str) -> Result<Self, ClientError> {
        Self::from_parts(
            parse_part("recipe id", recipe_id)?,
            parse_part("step number", step)?,
        )
    }

    pub fn recipe_id(&self) -> i64 {
        self.recipe_id
    }

    pub fn step(&self) -> u32 {
        self.step
    }
}

impl fmt::Display for RecipeStepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.recipe_id, self.step)
    }
}

fn missing(entity: &str, part: &str) -> ClientError {
    ClientError::Validation(format!("{} key is missing its {}", entity, part))
}

fn parse_part<T: std::str::FromStr>(name: &str, raw: &str) -> Result<Option<T>, ClientError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ClientError::Validation(format!("{} {:?} is not a number", name, trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_parts_required() {
        let err = RecipeIngredientKey::from_parts(Some(1), None).unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m.contains("ingredient id")));

        let err = RecipeStepKey::from_parts(None, Some(2)).unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref m) if m.contains("recipe id")));
    }

    #[test]
    fn test_parse_blank_counts_as_missing() {
        assert!(RecipeIngredientKey::parse("4", "  ").is_err());
        assert!(RecipeStepKey::parse("", "1").is_err());
        assert!(RecipeStepKey::parse("4", "one").is_err());
    }

    #[test]
    fn test_parse_valid() {
        let key = RecipeIngredientKey::parse(" 4 ", "9").unwrap();
        assert_eq!((key.recipe_id(), key.ingredient_id()), (4, 9));
        assert_eq!(key.to_string(), "4/9");

        let key = RecipeStepKey::parse("4", "2").unwrap();
        assert_eq!((key.recipe_id(), key.step()), (4, 2));
    }
}
