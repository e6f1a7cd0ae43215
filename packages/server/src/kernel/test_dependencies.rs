// TestDependencies - mock implementations for testing
//
// Provides an in-memory drink store that behaves like the PostgreSQL one
// (unique titles, column limits, serial ids) so routes can be exercised
// without a database.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::BaseDrinkStore;
use crate::domains::drinks::{Drink, DrinkChanges, DrinkError, RECIPE_MAX_LEN, TITLE_MAX_LEN};

// =============================================================================
// Mock Drink Store
// =============================================================================

#[derive(Default)]
struct MockDrinkTable {
    rows: BTreeMap<i32, Drink>,
    last_id: i32,
}

impl MockDrinkTable {
    fn check(&self, id: Option<i32>, title: &str, recipe: &str) -> Result<(), DrinkError> {
        if title.chars().count() > TITLE_MAX_LEN || recipe.chars().count() > RECIPE_MAX_LEN {
            return Err(DrinkError::Constraint("value too long".to_string()));
        }
        if self
            .rows
            .values()
            .any(|d| d.title == title && Some(d.id) != id)
        {
            return Err(DrinkError::Constraint(format!("duplicate title: {}", title)));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockDrinkStore {
    table: Arc<Mutex<MockDrinkTable>>,
    failing: bool,
}

impl MockDrinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like a lost database connection
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Insert a drink directly, bypassing constraint checks
    pub fn with_drink(self, title: &str, recipe: &str) -> Self {
        {
            let mut table = self.table.lock().unwrap();
            table.last_id += 1;
            let id = table.last_id;
            table.rows.insert(
                id,
                Drink {
                    id,
                    title: title.to_string(),
                    recipe: recipe.to_string(),
                },
            );
        }
        self
    }

    /// Snapshot of all rows, ordered by id
    pub fn drinks(&self) -> Vec<Drink> {
        self.table.lock().unwrap().rows.values().cloned().collect()
    }

    fn fail_if_configured(&self) -> Result<(), DrinkError> {
        if self.failing {
            Err(DrinkError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BaseDrinkStore for MockDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, DrinkError> {
        self.fail_if_configured()?;
        Ok(self.drinks())
    }

    async fn find(&self, id: i32) -> Result<Option<Drink>, DrinkError> {
        self.fail_if_configured()?;
        Ok(self.table.lock().unwrap().rows.get(&id).cloned())
    }

    async fn create(&self, title: &str, recipe: &str) -> Result<Drink, DrinkError> {
        self.fail_if_configured()?;
        let mut table = self.table.lock().unwrap();
        table.check(None, title, recipe)?;

        table.last_id += 1;
        let drink = Drink {
            id: table.last_id,
            title: title.to_string(),
            recipe: recipe.to_string(),
        };
        table.rows.insert(drink.id, drink.clone());
        Ok(drink)
    }

    async fn update(&self, id: i32, changes: DrinkChanges) -> Result<Drink, DrinkError> {
        self.fail_if_configured()?;
        let mut table = self.table.lock().unwrap();
        let current = table.rows.get(&id).cloned().ok_or(DrinkError::NotFound(id))?;

        let updated = Drink {
            id,
            title: changes.title.unwrap_or(current.title),
            recipe: changes.recipe.unwrap_or(current.recipe),
        };
        table.check(Some(id), &updated.title, &updated.recipe)?;
        table.rows.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<i32, DrinkError> {
        self.fail_if_configured()?;
        self.table
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|d| d.id)
            .ok_or(DrinkError::NotFound(id))
    }

    async fn ping(&self) -> Result<(), DrinkError> {
        self.fail_if_configured()
    }
}
