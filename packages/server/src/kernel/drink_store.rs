// PostgreSQL implementation of BaseDrinkStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{BaseDrinkStore, PoolStats};
use crate::domains::drinks::{Drink, DrinkChanges, DrinkError};

#[derive(Clone)]
pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseDrinkStore for PgDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, DrinkError> {
        Drink::find_all(&self.pool).await.map_err(Into::into)
    }

    async fn find(&self, id: i32) -> Result<Option<Drink>, DrinkError> {
        Drink::find_by_id(id, &self.pool).await.map_err(Into::into)
    }

    async fn create(&self, title: &str, recipe: &str) -> Result<Drink, DrinkError> {
        let drink = Drink::insert(title, recipe, &self.pool).await?;
        debug!(id = drink.id, title = %drink.title, "Created drink");
        Ok(drink)
    }

    async fn update(&self, id: i32, changes: DrinkChanges) -> Result<Drink, DrinkError> {
        let drink = Drink::update(id, &changes, &self.pool)
            .await?
            .ok_or(DrinkError::NotFound(id))?;
        debug!(id, "Updated drink");
        Ok(drink)
    }

    async fn delete(&self, id: i32) -> Result<i32, DrinkError> {
        let id = Drink::delete(id, &self.pool)
            .await?
            .ok_or(DrinkError::NotFound(id))?;
        debug!(id, "Deleted drink");
        Ok(id)
    }

    async fn ping(&self) -> Result<(), DrinkError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn pool_stats(&self) -> Option<PoolStats> {
        Some(PoolStats {
            size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        })
    }
}
