use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use mixwise_shared::{CanonicalId, Cocktail, CocktailId};
use serde::Serialize;

/// How much of one cocktail a bar covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageRecord {
    pub cocktail_id: CocktailId,
    pub cocktail_name: String,
    pub is_ready: bool,
    pub missing_count: usize,
    pub missing_ingredient_ids: BTreeSet<CanonicalId>,
}

/// Classifies every cocktail against the user's ingredients, in catalog order.
///
/// Only required ingredients count: optional ones never block a cocktail and
/// never show up as missing. A cocktail without required ingredients is
/// always ready.
pub fn compute_coverage(
    cocktails: &[Cocktail],
    user_ingredient_ids: &BTreeSet<CanonicalId>,
) -> Vec<CoverageRecord> {
    cocktails
        .iter()
        .map(|cocktail| coverage_of(cocktail, user_ingredient_ids))
        .collect()
}

fn coverage_of(cocktail: &Cocktail, user_ingredient_ids: &BTreeSet<CanonicalId>) -> CoverageRecord {
    let missing: BTreeSet<CanonicalId> = cocktail
        .required_ids()
        .filter(|id| !user_ingredient_ids.contains(*id))
        .cloned()
        .collect();

    CoverageRecord {
        cocktail_id: cocktail.id.clone(),
        cocktail_name: cocktail.name.to_owned(),
        is_ready: missing.is_empty(),
        missing_count: missing.len(),
        missing_ingredient_ids: missing,
    }
}

/// Presentation order: ready first, then fewest missing, then name, then id.
pub fn compare_coverage(a: &CoverageRecord, b: &CoverageRecord) -> Ordering {
    b.is_ready
        .cmp(&a.is_ready)
        .then_with(|| a.missing_count.cmp(&b.missing_count))
        .then_with(|| a.cocktail_name.cmp(&b.cocktail_name))
        .then_with(|| a.cocktail_id.cmp(&b.cocktail_id))
}

pub fn rank(records: &mut [CoverageRecord]) {
    records.sort_by(compare_coverage);
}

/// The two sections of the Mix page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MixResult {
    pub ready: Vec<CoverageRecord>,
    pub almost_there: Vec<CoverageRecord>,
}

impl MixResult {
    /// Ranks the records and keeps the ready ones plus those missing at most
    /// `max_missing` required ingredients.
    pub fn from_records(mut records: Vec<CoverageRecord>, max_missing: usize) -> Self {
        rank(&mut records);

        let mut result = Self::default();
        for record in records {
            if record.is_ready {
                result.ready.push(record);
            } else if record.missing_count <= max_missing {
                result.almost_there.push(record);
            }
        }

        result
    }
}

/// An ingredient that would complete one or more cocktails on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockSuggestion {
    pub ingredient_id: CanonicalId,
    pub unlocks: usize,
    pub cocktail_ids: Vec<CocktailId>,
}

/// Counts, for cocktails missing exactly one ingredient, how many each
/// missing ingredient would unlock. Most unlocks first, ties by ingredient id.
pub fn unlock_suggestions(records: &[CoverageRecord]) -> Vec<UnlockSuggestion> {
    let mut by_ingredient: BTreeMap<&CanonicalId, Vec<CocktailId>> = BTreeMap::new();

    for record in records.iter().filter(|r| r.missing_count == 1) {
        if let Some(id) = record.missing_ingredient_ids.first() {
            by_ingredient
                .entry(id)
                .or_default()
                .push(record.cocktail_id.clone());
        }
    }

    let mut suggestions: Vec<UnlockSuggestion> = by_ingredient
        .into_iter()
        .map(|(id, mut cocktail_ids)| {
            cocktail_ids.sort();
            UnlockSuggestion {
                ingredient_id: id.clone(),
                unlocks: cocktail_ids.len(),
                cocktail_ids,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.unlocks
            .cmp(&a.unlocks)
            .then_with(|| a.ingredient_id.cmp(&b.ingredient_id))
    });

    suggestions
}
