use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::{SearchIssue, SearchStatus};
use crate::model::{RecipeRecord, ScoredRecipe};
use crate::scoring;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindRecipesParams {
    /// Ingredients you have, in the user's language (for example "frango", "arroz").
    pub ingredients: Vec<String>,
    /// Optional cuisine/country in the user's language, exactly as listed by list_regions.
    pub region: Option<String>,
    /// Maximum number of recipes to return (default: 10, max: 50).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RegionRecipesParams {
    /// Country/cuisine in the user's language, as listed by list_regions.
    pub region: String,
    /// Maximum number of recipes to return (default: 5, max: 20).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RecipeIdParams {
    /// Catalog recipe ID such as "52874".
    pub recipe_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RateRecipeParams {
    /// Catalog recipe ID of a recipe returned earlier in this session.
    pub recipe_id: String,
    /// Rating from 1 to 5.
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IngredientLineView {
    /// "measure ingredient", localized.
    pub text: String,
    /// Whether a pantry item occurs in this line; absent for recipes not found by pantry.
    pub matched: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchScore {
    pub matches: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecipeView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub region: String,
    pub instructions: String,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub video_url: Option<String>,
    pub ingredients: Vec<IngredientLineView>,
    pub score: Option<MatchScore>,
    /// The session's rating for this recipe, if any.
    pub rating: Option<u8>,
}

impl RecipeView {
    pub fn from_scored(scored: &ScoredRecipe, rating: Option<u8>) -> Self {
        let ingredients = scored
            .lines
            .iter()
            .zip(&scored.matched)
            .map(|(text, matched)| IngredientLineView {
                text: text.clone(),
                matched: Some(*matched),
            })
            .collect();
        Self {
            score: Some(MatchScore {
                matches: scored.matches,
                total: scored.total,
                percent: scored.match_percent(),
            }),
            ingredients,
            rating,
            ..Self::from_record(&scored.recipe, None)
        }
    }

    pub fn from_record(record: &RecipeRecord, rating: Option<u8>) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            category: record.category.clone(),
            region: record.region.clone(),
            instructions: record.instructions.clone(),
            image_url: record.image_url.clone(),
            source_url: record.source_url.clone(),
            video_url: record.video_url.clone(),
            ingredients: record
                .ingredients
                .iter()
                .map(|line| IngredientLineView {
                    text: scoring::display_line(line),
                    matched: None,
                })
                .collect(),
            score: None,
            rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindRecipesResponse {
    pub status: SearchStatus,
    /// Distinct candidate recipes found before filtering and truncation.
    pub candidates: usize,
    pub recipes: Vec<RecipeView>,
    /// Units of work (terms, recipes, fields) that failed and were skipped.
    pub issues: Vec<SearchIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegionListResponse {
    pub regions: Vec<String>,
    pub issues: Vec<SearchIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegionRecipesResponse {
    /// Region as requested.
    pub region: String,
    /// Region name used against the catalog.
    pub catalog_region: String,
    pub status: SearchStatus,
    pub recipes: Vec<RecipeView>,
    pub issues: Vec<SearchIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RatingEntry {
    pub recipe_id: String,
    pub title: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RatingsResponse {
    /// Highest rating first.
    pub ratings: Vec<RatingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SavedRecipeSummary {
    pub recipe_id: String,
    pub title: String,
    pub score: MatchScore,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SavedRecipesResponse {
    /// Most recently saved first.
    pub recipes: Vec<SavedRecipeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchHistoryEntry {
    pub ingredients: Vec<String>,
    pub region: Option<String>,
    pub status: SearchStatus,
    pub recipe_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchHistoryResponse {
    /// Most recent search first.
    pub searches: Vec<SearchHistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OkResponse {
    pub ok: bool,
}
