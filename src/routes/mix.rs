use axum::{Json, extract::State};
use mixwise_mix::{
    CoverageRecord, IngredientIndex, MixResult, UnlockSuggestion, compute_coverage,
    unlock_suggestions,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::AppError, routes::AppState};

pub const MAX_MISSING_LIMIT: usize = 10;

#[derive(Deserialize, Validate)]
pub struct MixInput {
    #[validate(length(max = 500))]
    pub ingredient_ids: Vec<String>,
    #[validate(range(max = MAX_MISSING_LIMIT))]
    pub max_missing: Option<usize>,
}

#[derive(Serialize)]
pub struct MixResponse {
    pub ready: Vec<CoverageRecord>,
    pub almost_there: Vec<CoverageRecord>,
    pub unlock: Vec<UnlockSuggestion>,
    /// Raw identifiers the catalog does not know, in request order.
    pub unresolved: Vec<String>,
}

/// Normalizes `raw_ids` against the current catalog and splits every cocktail
/// into ready and almost there.
pub(crate) async fn compute_mix<I, S>(
    state: &AppState,
    raw_ids: I,
    max_missing: usize,
) -> Result<MixResponse, AppError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ingredients = state.catalog_query.ingredients().await?;
    let index = IngredientIndex::build(&ingredients);
    let normalized = index.normalize_many_with_report(raw_ids);

    if !normalized.unresolved.is_empty() {
        tracing::warn!(
            dropped = normalized.unresolved.len(),
            resolved = normalized.ids.len(),
            "Dropped unresolvable ingredient identifiers"
        );
    }

    let cocktails = state.catalog_query.cocktails().await?;
    let records = compute_coverage(&cocktails, &normalized.ids);
    let unlock = unlock_suggestions(&records);
    let MixResult {
        ready,
        almost_there,
    } = MixResult::from_records(records, max_missing);

    tracing::debug!(
        ready = ready.len(),
        almost_there = almost_there.len(),
        "Mix computed"
    );

    Ok(MixResponse {
        ready,
        almost_there,
        unlock,
        unresolved: normalized.unresolved,
    })
}

/// POST /api/mix
pub async fn action(
    State(state): State<AppState>,
    Json(input): Json<MixInput>,
) -> Result<Json<MixResponse>, AppError> {
    input.validate()?;

    let max_missing = input.max_missing.unwrap_or(state.config.mix.max_missing);
    let response = compute_mix(&state, &input.ingredient_ids, max_missing).await?;

    Ok(Json(response))
}
