use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    routes::{AppState, mix::MixResponse},
};

#[derive(Serialize)]
pub struct BarView {
    pub user_id: String,
    pub ingredient_ids: Vec<String>,
}

#[derive(Deserialize, Validate)]
pub struct BarInput {
    #[validate(length(max = 500))]
    pub ingredient_ids: Vec<String>,
}

#[derive(Deserialize, Validate)]
pub struct AddIngredientInput {
    #[validate(length(min = 1, max = 128))]
    pub ingredient_id: String,
}

fn validate_user_id(user_id: &str) -> Result<(), AppError> {
    if user_id.trim().is_empty() || user_id.len() > 64 {
        return Err(AppError::ValidationError(
            "user id must be between 1 and 64 characters".to_owned(),
        ));
    }

    Ok(())
}

async fn view(state: &AppState, user_id: String) -> Result<BarView, AppError> {
    let ingredient_ids = state.catalog_query.bar_ingredients(&user_id).await?;

    Ok(BarView {
        user_id,
        ingredient_ids,
    })
}

/// GET /api/bar/{user_id}
pub async fn page(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<BarView>, AppError> {
    validate_user_id(&user_id)?;

    Ok(Json(view(&state, user_id).await?))
}

/// PUT /api/bar/{user_id}
pub async fn replace(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<BarInput>,
) -> Result<Json<BarView>, AppError> {
    validate_user_id(&user_id)?;
    input.validate()?;

    state
        .catalog_command
        .replace_bar(&user_id, &input.ingredient_ids)
        .await?;

    Ok(Json(view(&state, user_id).await?))
}

/// POST /api/bar/{user_id}/ingredients
pub async fn add(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<AddIngredientInput>,
) -> Result<(StatusCode, Json<BarView>), AppError> {
    validate_user_id(&user_id)?;
    input.validate()?;

    let added = state
        .catalog_command
        .add_bar_ingredient(&user_id, input.ingredient_id)
        .await?;

    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(view(&state, user_id).await?)))
}

/// DELETE /api/bar/{user_id}/ingredients/{raw}
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, raw)): Path<(String, String)>,
) -> Result<Json<BarView>, AppError> {
    validate_user_id(&user_id)?;

    if !state
        .catalog_command
        .remove_bar_ingredient(&user_id, &raw)
        .await?
    {
        return Err(AppError::NotFound(format!("Bar ingredient '{raw}'")));
    }

    Ok(Json(view(&state, user_id).await?))
}

/// GET /api/bar/{user_id}/mix
pub async fn mix(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MixResponse>, AppError> {
    validate_user_id(&user_id)?;

    let raw_ids = state.catalog_query.bar_ingredients(&user_id).await?;
    let response =
        super::mix::compute_mix(&state, &raw_ids, state.config.mix.max_missing).await?;

    Ok(Json(response))
}
