use axum::{
    Json,
    extract::{Path, State},
};
use mixwise_mix::{CanonicalId, IngredientIndex};
use serde::Serialize;

use crate::{error::AppError, routes::AppState};

#[derive(Serialize)]
pub struct Resolved {
    pub raw: String,
    pub id: CanonicalId,
}

/// GET /api/ingredients/resolve/{raw}
pub async fn resolve(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Resolved>, AppError> {
    let ingredients = state.catalog_query.ingredients().await?;
    let index = IngredientIndex::build(&ingredients);

    match index.normalize(&raw) {
        Some(id) => Ok(Json(Resolved { raw, id })),
        None => Err(AppError::NotFound(format!("Ingredient '{raw}'"))),
    }
}
