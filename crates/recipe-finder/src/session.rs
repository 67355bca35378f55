/// Per-client session state: ratings, saved recipes, search history and every recipe
/// shown so far.
///
/// The engine never sees this; the server owns one `Session` per connected client and
/// drops it when the client goes away.
use std::collections::HashMap;

use recipe_core::engine::RankOutcome;
use recipe_core::mcp_api::{
    MatchScore, RatingEntry, RecipeView, SavedRecipeSummary, SearchHistoryEntry,
};
use recipe_core::model::{RecipeId, RecipeRecord, ScoredRecipe};

use crate::error::AppError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone)]
pub enum SeenRecipe {
    /// Found by a pantry search, with its score.
    Scored(ScoredRecipe),
    /// Shown while browsing a region.
    Browsed(RecipeRecord),
}

impl SeenRecipe {
    pub fn title(&self) -> &str {
        match self {
            SeenRecipe::Scored(scored) => &scored.recipe.title,
            SeenRecipe::Browsed(record) => &record.title,
        }
    }

    pub fn view(&self, rating: Option<u8>) -> RecipeView {
        match self {
            SeenRecipe::Scored(scored) => RecipeView::from_scored(scored, rating),
            SeenRecipe::Browsed(record) => RecipeView::from_record(record, rating),
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    ratings: HashMap<RecipeId, u8>,
    /// Most recent first.
    saved: Vec<ScoredRecipe>,
    /// Oldest first.
    history: Vec<SearchHistoryEntry>,
    seen: HashMap<RecipeId, SeenRecipe>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished search: every returned recipe becomes resolvable by id, the
    /// best match is saved, and the query joins the history.
    pub fn remember_search(&mut self, pantry: &[String], region: Option<&str>, outcome: &RankOutcome) {
        for scored in &outcome.recipes {
            self.seen
                .insert(scored.recipe.id.clone(), SeenRecipe::Scored(scored.clone()));
        }
        if let Some(best) = outcome.recipes.first() {
            self.saved.retain(|s| s.recipe.id != best.recipe.id);
            self.saved.insert(0, best.clone());
        }
        self.history.push(SearchHistoryEntry {
            ingredients: pantry.to_vec(),
            region: region.map(str::to_string),
            status: outcome.status,
            recipe_ids: outcome.recipes.iter().map(|r| r.recipe.id.clone()).collect(),
        });
    }

    pub fn remember_browsed(&mut self, records: &[RecipeRecord]) {
        for record in records {
            // a scored entry carries more than a browsed one
            self.seen
                .entry(record.id.clone())
                .or_insert_with(|| SeenRecipe::Browsed(record.clone()));
        }
    }

    pub fn recipe(&self, id: &str) -> Option<&SeenRecipe> {
        self.seen.get(id)
    }

    pub fn rating(&self, id: &str) -> Option<u8> {
        self.ratings.get(id).copied()
    }

    pub fn rate(&mut self, id: &str, rating: u8) -> Result<(), AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidRating(rating));
        }
        if !self.seen.contains_key(id) {
            return Err(AppError::UnknownRecipe(id.to_string()));
        }
        self.ratings.insert(id.to_string(), rating);
        Ok(())
    }

    /// Rated recipes, highest rating first; ties ordered by recipe id.
    pub fn ratings(&self) -> Vec<RatingEntry> {
        let mut entries: Vec<RatingEntry> = self
            .ratings
            .iter()
            .filter_map(|(id, rating)| {
                let seen = self.seen.get(id)?;
                Some(RatingEntry {
                    recipe_id: id.clone(),
                    title: seen.title().to_string(),
                    rating: *rating,
                })
            })
            .collect();
        entries.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.recipe_id.cmp(&b.recipe_id)));
        entries
    }

    pub fn saved(&self) -> Vec<SavedRecipeSummary> {
        self.saved
            .iter()
            .map(|scored| SavedRecipeSummary {
                recipe_id: scored.recipe.id.clone(),
                title: scored.recipe.title.clone(),
                score: MatchScore {
                    matches: scored.matches,
                    total: scored.total,
                    percent: scored.match_percent(),
                },
                rating: self.rating(&scored.recipe.id),
            })
            .collect()
    }

    /// Returns `false` when the recipe was not saved.
    pub fn remove_saved(&mut self, id: &str) -> bool {
        let before = self.saved.len();
        self.saved.retain(|s| s.recipe.id != id);
        self.saved.len() != before
    }

    /// Most recent search first.
    pub fn history(&self) -> Vec<SearchHistoryEntry> {
        self.history.iter().rev().cloned().collect()
    }

    pub fn searches(&self) -> usize {
        self.history.len()
    }
}
