// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BaseDrinkStore)

use async_trait::async_trait;

use crate::domains::drinks::{Drink, DrinkChanges, DrinkError};

// =============================================================================
// Drink Store Trait (Infrastructure - drink persistence)
// =============================================================================

/// Connection pool utilization, reported by the health check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub size: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

#[async_trait]
pub trait BaseDrinkStore: Send + Sync {
    /// All drinks ordered by id
    async fn list(&self) -> Result<Vec<Drink>, DrinkError>;

    async fn find(&self, id: i32) -> Result<Option<Drink>, DrinkError>;

    /// `recipe` is the already-encoded ingredient list
    async fn create(&self, title: &str, recipe: &str) -> Result<Drink, DrinkError>;

    /// Fails with `DrinkError::NotFound` when `id` does not exist
    async fn update(&self, id: i32, changes: DrinkChanges) -> Result<Drink, DrinkError>;

    /// Returns the deleted id; fails with `DrinkError::NotFound` when `id` does not exist
    async fn delete(&self, id: i32) -> Result<i32, DrinkError>;

    /// Round-trip to the backing store
    async fn ping(&self) -> Result<(), DrinkError>;

    fn pool_stats(&self) -> Option<PoolStats> {
        None
    }
}
