//! Database-backed bar inventory, one set of ingredient names per user.
//!
//! Names are normalized before they are stored, so the `(user_id, name)`
//! unique index is what makes "Lime Juice" and " lime juice" the same item.

use diesel::prelude::*;
use mixbuddy_core::{normalize, IngredientName, Inventory};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{InventoryItem, NewInventoryItem};
use crate::schema::inventory_items;

/// Matches the `VARCHAR(255)` name column.
pub const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Error)]
pub enum AddItemError {
    #[error("Ingredient name cannot be empty")]
    Blank,

    #[error("Ingredient name is too long (max 255 characters)")]
    TooLong,

    #[error("Ingredient already in inventory")]
    AlreadyOwned,

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Normalize `raw` and check it fits the column.
pub fn validate_name(raw: &str) -> Result<IngredientName, AddItemError> {
    let name = normalize(raw);
    if name.is_empty() {
        return Err(AddItemError::Blank);
    }
    if name.as_str().chars().count() > MAX_NAME_LEN {
        return Err(AddItemError::TooLong);
    }
    Ok(name)
}

/// Inventory operations scoped to a single user.
pub struct InventoryStore<'a> {
    conn: &'a mut PgConnection,
    user_id: Uuid,
}

impl<'a> InventoryStore<'a> {
    pub fn new(conn: &'a mut PgConnection, user_id: Uuid) -> Self {
        Self { conn, user_id }
    }

    /// All of the user's items, sorted by name.
    pub fn list(&mut self) -> QueryResult<Vec<InventoryItem>> {
        inventory_items::table
            .filter(inventory_items::user_id.eq(self.user_id))
            .order(inventory_items::name.asc())
            .select(InventoryItem::as_select())
            .load(&mut *self.conn)
    }

    /// The user's ingredient set, ready for matching.
    pub fn load(&mut self) -> QueryResult<Inventory> {
        let names: Vec<String> = inventory_items::table
            .filter(inventory_items::user_id.eq(self.user_id))
            .select(inventory_items::name)
            .load(&mut *self.conn)?;
        Ok(names.into_iter().collect())
    }

    /// Normalize `raw` and add it.
    pub fn add(&mut self, raw: &str) -> Result<InventoryItem, AddItemError> {
        let name = validate_name(raw)?;

        let result = diesel::insert_into(inventory_items::table)
            .values(&NewInventoryItem {
                user_id: self.user_id,
                name: name.as_str(),
            })
            .returning(InventoryItem::as_returning())
            .get_result(&mut *self.conn);

        match result {
            Ok(item) => Ok(item),
            Err(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            )) => Err(AddItemError::AlreadyOwned),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove one of the user's items. Returns false when no such item
    /// belongs to this user.
    pub fn remove(&mut self, id: Uuid) -> QueryResult<bool> {
        let deleted = diesel::delete(
            inventory_items::table
                .filter(inventory_items::id.eq(id))
                .filter(inventory_items::user_id.eq(self.user_id)),
        )
        .execute(&mut *self.conn)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_normalizes() {
        assert_eq!(validate_name("  Lime Juice ").unwrap().as_str(), "lime juice");
    }

    #[test]
    fn test_validate_name_blank() {
        assert!(matches!(validate_name(" \t "), Err(AddItemError::Blank)));
    }

    #[test]
    fn test_validate_name_length_limit() {
        let longest = "a".repeat(MAX_NAME_LEN);
        assert!(validate_name(&longest).is_ok());

        let too_long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(validate_name(&too_long), Err(AddItemError::TooLong)));
    }

    #[test]
    fn test_validate_name_counts_characters_not_bytes() {
        // 255 two-byte characters still fit the column
        assert!(validate_name(&"é".repeat(MAX_NAME_LEN)).is_ok());
        // Surrounding whitespace is trimmed before the check
        assert!(validate_name(&format!("  {}  ", "a".repeat(MAX_NAME_LEN))).is_ok());
    }
}
