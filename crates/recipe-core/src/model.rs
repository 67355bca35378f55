use serde::{Deserialize, Serialize};

pub type RecipeId = String;

/// One component of a recipe: an ingredient and the quantity it is used in.
///
/// `measure` is empty when the catalog gives no quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecipeId,
    pub title: String,
    pub category: String,
    pub region: String,
    pub instructions: String,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub video_url: Option<String>,
    pub ingredients: Vec<IngredientLine>,
}

/// Row returned by the catalog's filter endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub image_url: Option<String>,
}

/// A localized recipe together with its overlap against the pantry it was found for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecipe {
    pub recipe: RecipeRecord,
    /// "measure ingredient" display strings, one per ingredient line, in recipe order.
    pub lines: Vec<String>,
    /// Per-line match flags, parallel to `lines`.
    pub matched: Vec<bool>,
    pub matches: usize,
    pub total: usize,
}

impl ScoredRecipe {
    pub fn id(&self) -> &str {
        &self.recipe.id
    }

    /// Fraction of ingredient lines covered by the pantry; 0 for a recipe with no lines.
    pub fn match_ratio(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.matches as f32 / self.total as f32
    }

    pub fn match_percent(&self) -> u32 {
        (self.match_ratio() * 100.0).round() as u32
    }
}
