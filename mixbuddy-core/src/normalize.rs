//! Ingredient name normalization.
//!
//! Every ingredient comparison in MixBuddy goes through [`IngredientName`]: the
//! lower-cased, trimmed form of whatever a user typed or the recipe source
//! returned. Nothing else is folded (no plurals, no synonyms), so "limes" and
//! "lime" stay distinct.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Canonical ingredient key: lower-case with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientName(String);

impl IngredientName {
    /// Normalize a raw ingredient string.
    ///
    /// Never fails. An all-whitespace input yields the empty name; callers that
    /// persist or query by name must reject it themselves.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Normalize a raw ingredient string. Shorthand for [`IngredientName::new`].
pub fn normalize(raw: &str) -> IngredientName {
    IngredientName::new(raw)
}

impl fmt::Display for IngredientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IngredientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IngredientName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IngredientName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for IngredientName {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

/// The set of ingredients one user owns.
///
/// Backed by a `BTreeSet` so iteration order is stable, which keeps recipe
/// lookups issued in the same order for the same inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeSet<IngredientName>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient. Returns false if it was already present.
    pub fn insert(&mut self, name: IngredientName) -> bool {
        self.items.insert(name)
    }

    pub fn remove(&mut self, name: &IngredientName) -> bool {
        self.items.remove(name)
    }

    /// Membership test on an already-normalized name.
    pub fn contains(&self, name: &IngredientName) -> bool {
        self.items.contains(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IngredientName> {
        self.items.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Inventory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|raw| IngredientName::new(raw.as_ref()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a IngredientName;
    type IntoIter = std::collections::btree_set::Iter<'a, IngredientName>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
