use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domains::drinks::DrinkError;

/// Column limits, matching the `drinks` table
pub const TITLE_MAX_LEN: usize = 80;
pub const RECIPE_MAX_LEN: usize = 180;

/// One colored layer of a drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// Recipe as sent by clients: a list of ingredients or a single one
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    pub fn into_ingredients(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

/// Serialize ingredients into the text stored in the `recipe` column
pub fn encode_recipe(ingredients: &[Ingredient]) -> Result<String, DrinkError> {
    serde_json::to_string(ingredients).map_err(Into::into)
}

/// Ingredient with its name redacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Public menu projection of a drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortDrink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full projection of a drink, ingredient names included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongDrink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// A row of the `drinks` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    /// JSON-encoded `Vec<Ingredient>`
    pub recipe: String,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<String>,
}

impl Drink {
    pub fn ingredients(&self) -> Result<Vec<Ingredient>, DrinkError> {
        serde_json::from_str(&self.recipe).map_err(Into::into)
    }

    pub fn short(&self) -> Result<ShortDrink, DrinkError> {
        let recipe = self
            .ingredients()?
            .into_iter()
            .map(|i| ShortIngredient {
                color: i.color,
                parts: i.parts,
            })
            .collect();

        Ok(ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe,
        })
    }

    pub fn long(&self) -> Result<LongDrink, DrinkError> {
        Ok(LongDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self.ingredients()?,
        })
    }

    /// The drink every freshly reset menu starts with
    pub fn example() -> (String, Vec<Ingredient>) {
        (
            "water".to_string(),
            vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        )
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(id: i32, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn insert(title: &str, recipe: &str, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(recipe)
        .fetch_one(pool)
        .await
    }

    /// Returns `None` when no drink has this id
    pub async fn update(
        id: i32,
        changes: &DrinkChanges,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE drinks
            SET title = COALESCE($2, title),
                recipe = COALESCE($3, recipe)
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.recipe.as_deref())
        .fetch_optional(pool)
        .await
    }

    /// Returns the deleted id, or `None` when no drink has this id
    pub async fn delete(id: i32, pool: &PgPool) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("DELETE FROM drinks WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the example drink unless a drink with its title exists
    pub async fn seed(pool: &PgPool) -> Result<Option<Self>, DrinkError> {
        let (title, ingredients) = Self::example();
        let recipe = encode_recipe(&ingredients)?;

        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            ON CONFLICT (title) DO NOTHING
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(recipe)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Empty the table, restart ids at 1 and seed the example drink
    pub async fn drop_and_create_all(pool: &PgPool) -> Result<Self, DrinkError> {
        sqlx::query("TRUNCATE TABLE drinks RESTART IDENTITY")
            .execute(pool)
            .await?;

        Self::seed(pool)
            .await?
            .ok_or_else(|| DrinkError::Constraint("example drink already present".to_string()))
    }
}
