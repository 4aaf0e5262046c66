use std::collections::{BTreeSet, HashMap};

use mixwise_shared::{CanonicalId, Ingredient};

use crate::shape::{IdentifierShape, is_all_digits, is_uuid_shaped, parse_identifier_shape};

/// Lookup table from every known spelling of an ingredient to its canonical id.
///
/// Text keys are the lowercased canonical id, the lowercased name and the
/// lowercased non-numeric legacy id. Numeric legacy ids live in their own
/// table so they never shadow a name. Later ingredients win when two of them
/// claim the same key.
#[derive(Debug, Default, Clone)]
pub struct IngredientIndex {
    keys: HashMap<String, CanonicalId>,
    numeric: HashMap<String, CanonicalId>,
    collisions: usize,
}

/// Outcome of a batch normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub ids: BTreeSet<CanonicalId>,
    /// Raw identifiers that did not resolve, in input order.
    pub unresolved: Vec<String>,
}

impl IngredientIndex {
    pub fn build<'a>(ingredients: impl IntoIterator<Item = &'a Ingredient>) -> Self {
        let mut index = Self::default();

        for ingredient in ingredients {
            let id = &ingredient.id;

            if !is_uuid_shaped(id.as_str()) {
                tracing::warn!(
                    ingredient.id = %id,
                    ingredient.name = %ingredient.name,
                    "Ingredient id is not UUID-shaped, using it as-is"
                );
            }

            let mut keys = vec![id.as_str().to_lowercase()];

            if !ingredient.name.is_empty() {
                keys.push(ingredient.name.to_lowercase());
            }

            match ingredient.legacy_id.as_deref() {
                Some(legacy) if is_all_digits(legacy) => {
                    let previous = index.numeric.insert(legacy.to_owned(), id.clone());
                    index.track_collision(legacy, previous, id);
                }
                Some(legacy) if !legacy.is_empty() => keys.push(legacy.to_lowercase()),
                _ => {}
            }

            for key in keys {
                let previous = index.keys.insert(key.clone(), id.clone());
                index.track_collision(&key, previous, id);
            }
        }

        tracing::debug!(
            keys = index.len(),
            collisions = index.collisions,
            "Ingredient index built"
        );

        index
    }

    fn track_collision(&mut self, key: &str, previous: Option<CanonicalId>, id: &CanonicalId) {
        if let Some(previous) = previous {
            if &previous != id {
                tracing::warn!(
                    key = %key,
                    previous = %previous,
                    current = %id,
                    "Ingredient key claimed twice, keeping the latest"
                );
                self.collisions += 1;
            }
        }
    }

    /// Number of distinct lookup keys.
    pub fn len(&self) -> usize {
        self.keys.len() + self.numeric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.numeric.is_empty()
    }

    /// How many keys were overwritten by a different ingredient while building.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    fn lookup(&self, key: &str) -> Option<&CanonicalId> {
        self.keys.get(&key.to_lowercase())
    }

    /// Resolves one raw identifier. `None` means the identifier is unknown and
    /// the caller should present it as unrecognized.
    pub fn normalize(&self, raw: &str) -> Option<CanonicalId> {
        match parse_identifier_shape(raw.trim()) {
            IdentifierShape::Uuid(id) => Some(CanonicalId::new(id)),
            IdentifierShape::Numeric(digits) => self
                .numeric
                .get(digits)
                .or_else(|| self.lookup(digits))
                .cloned(),
            IdentifierShape::Legacy(key) | IdentifierShape::Name(key) => {
                self.lookup(key).cloned()
            }
        }
    }

    /// Resolves a batch, dropping unknown identifiers and collapsing duplicates.
    pub fn normalize_many<I, S>(&self, raw_ids: I) -> BTreeSet<CanonicalId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = self.normalize_many_with_report(raw_ids);

        if !normalized.unresolved.is_empty() {
            tracing::warn!(
                dropped = normalized.unresolved.len(),
                resolved = normalized.ids.len(),
                "Dropped unresolvable ingredient identifiers"
            );
        }

        normalized.ids
    }

    /// Same as [`normalize_many`](Self::normalize_many) but keeps track of
    /// what was dropped.
    pub fn normalize_many_with_report<I, S>(&self, raw_ids: I) -> Normalized
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Normalized::default();

        for raw in raw_ids {
            let raw = raw.as_ref();
            match self.normalize(raw) {
                Some(id) => {
                    normalized.ids.insert(id);
                }
                None => normalized.unresolved.push(raw.to_owned()),
            }
        }

        normalized
    }
}
