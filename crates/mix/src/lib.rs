//! Ingredient matching for the Mix tool.
//!
//! Three pure pieces live here: the [`IngredientIndex`] that resolves raw
//! ingredient identifiers into [`CanonicalId`]s, the coverage engine that
//! classifies cocktails against a user's bar, and the deterministic
//! cocktail-of-the-day selection.

mod coverage;
mod daily;
mod index;
mod shape;

pub use coverage::*;
pub use daily::*;
pub use index::*;
pub use shape::*;

pub use mixwise_shared::{CanonicalId, Cocktail, CocktailId, Ingredient, Requirement};
