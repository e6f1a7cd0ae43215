use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::common::auth::{DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks};
use crate::common::ApiError;
use crate::domains::drinks::{
    encode_recipe, Drink, DrinkChanges, DrinkError, LongDrink, RecipeInput, ShortDrink,
};
use crate::server::app::AppState;
use crate::server::middleware::{DrinkId, JsonBody, RequirePermission};

/// `{"success": true, "drinks": ...}`
#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: T,
}

impl<T> DrinksResponse<T> {
    fn ok(drinks: T) -> Json<Self> {
        Json(Self {
            success: true,
            drinks,
        })
    }
}

/// Body of POST and PATCH requests
#[derive(Debug, Deserialize)]
pub struct DrinkPayload {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

fn server_error(err: DrinkError) -> ApiError {
    error!(error = %err, "Drink persistence failed");
    ApiError::ServerError
}

/// Writes that fail on a constraint or the database are unprocessable
fn write_error(err: DrinkError) -> ApiError {
    match err {
        DrinkError::NotFound(_) => ApiError::NotFound,
        DrinkError::Recipe(_) => server_error(err),
        DrinkError::Constraint(_) | DrinkError::Database(_) => {
            warn!(error = %err, "Drink write rejected");
            ApiError::Unprocessable
        }
    }
}

fn encode(recipe: RecipeInput) -> Result<String, ApiError> {
    encode_recipe(&recipe.into_ingredients()).map_err(server_error)
}

fn long_views(drinks: &[Drink]) -> Result<Vec<LongDrink>, ApiError> {
    drinks
        .iter()
        .map(Drink::long)
        .collect::<Result<Vec<_>, _>>()
        .map_err(server_error)
}

/// Public menu, ingredient names redacted
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<Vec<ShortDrink>>>, ApiError> {
    let drinks = state.drink_store.list().await.map_err(server_error)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    let drinks = drinks
        .iter()
        .map(Drink::short)
        .collect::<Result<Vec<_>, _>>()
        .map_err(server_error)?;

    Ok(DrinksResponse::ok(drinks))
}

/// Full menu with recipes, for staff holding `get:drinks-detail`
pub async fn list_drinks_detail(
    _auth: RequirePermission<GetDrinksDetail>,
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<Vec<LongDrink>>>, ApiError> {
    let drinks = state.drink_store.list().await.map_err(server_error)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(DrinksResponse::ok(long_views(&drinks)?))
}

pub async fn create_drink(
    auth: RequirePermission<PostDrinks>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DrinkPayload>,
) -> Result<Json<DrinksResponse<Vec<LongDrink>>>, ApiError> {
    let (Some(title), Some(recipe)) = (payload.title, payload.recipe) else {
        return Err(ApiError::Unprocessable);
    };
    let recipe = encode(recipe)?;

    let drink = state
        .drink_store
        .create(&title, &recipe)
        .await
        .map_err(write_error)?;

    info!(id = drink.id, title = %drink.title, by = %auth.claims.sub, "Drink created");
    Ok(DrinksResponse::ok(long_views(&[drink])?))
}

/// Partial update; fields absent from the body keep their value
///
/// An unknown id is reported before the body is looked at.
pub async fn update_drink(
    DrinkId(id): DrinkId,
    auth: RequirePermission<PatchDrinks>,
    State(state): State<AppState>,
    payload: Result<JsonBody<DrinkPayload>, ApiError>,
) -> Result<Json<DrinksResponse<Vec<LongDrink>>>, ApiError> {
    state
        .drink_store
        .find(id)
        .await
        .map_err(write_error)?
        .ok_or(ApiError::NotFound)?;
    let JsonBody(payload) = payload?;

    let changes = DrinkChanges {
        title: payload.title,
        recipe: payload.recipe.map(encode).transpose()?,
    };

    let drink = state
        .drink_store
        .update(id, changes)
        .await
        .map_err(write_error)?;

    info!(id, by = %auth.claims.sub, "Drink updated");
    Ok(DrinksResponse::ok(long_views(&[drink])?))
}

/// Responds with the bare deleted id under `drinks`
pub async fn delete_drink(
    DrinkId(id): DrinkId,
    auth: RequirePermission<DeleteDrinks>,
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<i32>>, ApiError> {
    let id = state.drink_store.delete(id).await.map_err(|err| match err {
        DrinkError::NotFound(_) => ApiError::NotFound,
        other => server_error(other),
    })?;

    info!(id, by = %auth.claims.sub, "Drink deleted");
    Ok(DrinksResponse::ok(id))
}
