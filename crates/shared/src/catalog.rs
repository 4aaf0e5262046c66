use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{CanonicalId, CocktailId};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Spirit,
    Liqueur,
    Amaro,
    #[strum(serialize = "Wine & Beer")]
    #[serde(rename = "Wine & Beer")]
    WineAndBeer,
    Mixer,
    Citrus,
    Syrup,
    Bitters,
    Garnish,
    #[default]
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: CanonicalId,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub ingredient_id: CanonicalId,
    #[serde(default)]
    pub is_optional: bool,
}

impl Requirement {
    pub fn required(ingredient_id: impl Into<String>) -> Self {
        Self {
            ingredient_id: CanonicalId::new(ingredient_id),
            is_optional: false,
        }
    }

    pub fn optional(ingredient_id: impl Into<String>) -> Self {
        Self {
            ingredient_id: CanonicalId::new(ingredient_id),
            is_optional: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cocktail {
    pub id: CocktailId,
    /// Derived from the name on import when left empty.
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl Cocktail {
    /// Ingredients that block makeability. Optional ones are skipped.
    pub fn required_ids(&self) -> impl Iterator<Item = &CanonicalId> {
        self.requirements
            .iter()
            .filter(|r| !r.is_optional)
            .map(|r| &r.ingredient_id)
    }
}
