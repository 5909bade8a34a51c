//! Availability matching: can this inventory make this recipe, and if not,
//! what is missing?

use serde::Serialize;

use crate::normalize::{IngredientName, Inventory};
use crate::types::RecipeIngredient;

/// Outcome of matching one recipe against one inventory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Availability {
    pub can_make: bool,
    /// Absent ingredients in recipe order, normalized.
    pub missing: Vec<IngredientName>,
}

/// Match a recipe's ingredient list against an inventory.
///
/// Source names are normalized here because recipe data arrives with
/// arbitrary casing and padding. A recipe with no ingredients is makeable.
pub fn evaluate(inventory: &Inventory, ingredients: &[RecipeIngredient]) -> Availability {
    let missing: Vec<IngredientName> = ingredients
        .iter()
        .map(RecipeIngredient::key)
        .filter(|name| !inventory.contains(name))
        .collect();

    Availability {
        can_make: missing.is_empty(),
        missing,
    }
}
