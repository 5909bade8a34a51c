use serde::{Deserialize, Serialize};

use crate::matcher::Availability;
use crate::normalize::IngredientName;

/// One line of a recipe, as the source presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Display name with the source's casing. Compare via [`RecipeIngredient::key`].
    pub name: String,
    pub measure: Option<String>,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, measure: Option<String>) -> Self {
        Self {
            name: name.into(),
            measure,
        }
    }

    /// The normalized matching key for this ingredient.
    pub fn key(&self) -> IngredientName {
        IngredientName::new(&self.name)
    }
}

/// Recipe identifier and name, as returned by an ingredient-filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStub {
    pub id: String,
    pub name: String,
}

/// A full recipe record decoded from the recipe source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub instructions: Option<String>,
    pub glass: Option<String>,
    pub image_url: Option<String>,
    /// Ordered as the source lists them.
    pub ingredients: Vec<RecipeIngredient>,
}

/// Recipe evaluated against an inventory. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub can_make: bool,
    pub missing: Vec<IngredientName>,
}

/// [`RecipeSummary`] plus everything needed to actually mix the drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub can_make: bool,
    pub missing: Vec<IngredientName>,
    pub instructions: Option<String>,
    pub glass: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
}

impl RecipeDetail {
    pub fn from_recipe(recipe: Recipe, availability: Availability) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            can_make: availability.can_make,
            missing: availability.missing,
            instructions: recipe.instructions,
            glass: recipe.glass,
            image_url: recipe.image_url,
            ingredients: recipe.ingredients,
        }
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            can_make: self.can_make,
            missing: self.missing.clone(),
        }
    }
}
