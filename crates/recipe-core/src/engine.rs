/// Ingredient matching and recipe ranking.
///
/// `RankingEngine::rank` runs the whole pipeline for one search:
///
/// 1. normalize the pantry and translate each item into the catalog locale
/// 2. look up each distinct term and union the ids in discovery order
/// 3. keep at most `max_candidates` ids
/// 4. fetch and localize every candidate
/// 5. apply the region filter against the localized region
/// 6. score against the pantry, stable-sort by matches, truncate to `limit`
///
/// Every unit of work fails on its own: a term, a candidate, a field. Failures become
/// `SearchIssue`s on the outcome and the search carries on with what is left. The
/// engine holds no state between calls.
use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::RecipeSource;
use crate::error::CommonError;
use crate::http;
use crate::localize::{Localized, Localizer};
use crate::model::{RecipeId, ScoredRecipe};
use crate::scoring;
use crate::translate::Translator;

pub const DEFAULT_MAX_CANDIDATES: usize = 50;
pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_REGION_BROWSE_LIMIT: usize = 5;
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_ALL_REGIONS_LABEL: &str = "Todos";

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Locale of the pantry and of everything shown to the user.
    pub user_locale: String,
    /// Locale the recipe catalog is written in.
    pub catalog_locale: String,
    pub max_candidates: usize,
    pub default_limit: usize,
    pub region_browse_limit: usize,
    /// Upper bound on in-flight catalog calls per fan-out step, and on translation
    /// calls across all recipes being localized at once.
    pub concurrency: usize,
    /// Region filter value meaning "no filter".
    pub all_regions_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            user_locale: "pt".to_string(),
            catalog_locale: "en".to_string(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            default_limit: DEFAULT_LIMIT,
            region_browse_limit: DEFAULT_REGION_BROWSE_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
            all_regions_label: DEFAULT_ALL_REGIONS_LABEL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Optional:
    /// - `USER_LOCALE` (default: "pt")
    /// - `CATALOG_LOCALE` (default: "en")
    /// - `RECIPE_MAX_CANDIDATES` (default: 50)
    /// - `RECIPE_DEFAULT_LIMIT` (default: 10)
    /// - `REGION_BROWSE_LIMIT` (default: 5)
    /// - `RECIPE_CONCURRENCY` (default: 8)
    /// - `ALL_REGIONS_LABEL` (default: "Todos")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_locale: std::env::var("USER_LOCALE").unwrap_or(defaults.user_locale),
            catalog_locale: std::env::var("CATALOG_LOCALE").unwrap_or(defaults.catalog_locale),
            max_candidates: http::env_var("RECIPE_MAX_CANDIDATES").unwrap_or(defaults.max_candidates),
            default_limit: http::env_var("RECIPE_DEFAULT_LIMIT").unwrap_or(defaults.default_limit),
            region_browse_limit: http::env_var("REGION_BROWSE_LIMIT")
                .unwrap_or(defaults.region_browse_limit),
            concurrency: http::env_var("RECIPE_CONCURRENCY").unwrap_or(defaults.concurrency),
            all_regions_label: std::env::var("ALL_REGIONS_LABEL")
                .unwrap_or(defaults.all_regions_label),
        }
    }

    /// True for the sentinel that disables region filtering.
    pub fn is_all_regions(&self, region: &str) -> bool {
        let region = region.trim();
        region.is_empty() || region == self.all_regions_label || region.eq_ignore_ascii_case("all")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PantryTranslation,
    IngredientLookup,
    RecipeLookup,
    Localization,
    RegionList,
    RegionLookup,
}

/// One unit of work that contributed nothing because it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchIssue {
    pub stage: Stage,
    /// The pantry item, term, recipe id or field the failure belongs to.
    pub subject: String,
    pub kind: String,
    pub message: String,
}

impl SearchIssue {
    pub fn new(stage: Stage, subject: impl Into<String>, error: &CommonError) -> Self {
        Self {
            stage,
            subject: subject.into(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Nothing usable was left after trimming the pantry.
    NoPantry,
    /// Every pantry item failed to translate.
    PantryUntranslatable,
    /// Every catalog lookup failed.
    SourceUnavailable,
    /// The catalog answered but knows no recipe for any term.
    NoCandidates,
    /// Candidates existed but none could be fetched.
    AllCandidatesFailed,
    /// Recipes were fetched but none is from the requested region.
    FilteredOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum SearchStatus {
    Complete,
    /// Results exist, but some units failed along the way.
    Degraded,
    Empty(EmptyReason),
}

#[derive(Debug, Clone)]
pub struct RankOutcome {
    pub recipes: Vec<ScoredRecipe>,
    pub status: SearchStatus,
    pub issues: Vec<SearchIssue>,
    /// Distinct candidate ids discovered before the cap.
    pub candidates: usize,
}

impl RankOutcome {
    fn empty(reason: EmptyReason, issues: Vec<SearchIssue>, candidates: usize) -> Self {
        Self {
            recipes: Vec::new(),
            status: SearchStatus::Empty(reason),
            issues,
            candidates,
        }
    }
}

/// Fetches one record and localizes it into the user locale.
pub(crate) async fn fetch_localized(
    source: &dyn RecipeSource,
    localizer: &Localizer,
    id: RecipeId,
) -> (RecipeId, Result<Localized, CommonError>) {
    let result = match source.lookup_by_id(&id).await {
        Ok(record) => Ok(localizer.localize(record).await),
        Err(e) => Err(e),
    };
    (id, result)
}

/// Splits fetched candidates into records and issues, preserving input order.
pub(crate) fn collect_fetched(
    fetched: Vec<(RecipeId, Result<Localized, CommonError>)>,
    issues: &mut Vec<SearchIssue>,
) -> Vec<crate::model::RecipeRecord> {
    let mut records = Vec::with_capacity(fetched.len());
    for (id, result) in fetched {
        match result {
            Ok(localized) => {
                if !localized.is_complete() {
                    debug!(
                        recipe_id = %id,
                        failed_fields = localized.failures.len(),
                        "keeping partially localized recipe"
                    );
                }
                for failure in &localized.failures {
                    issues.push(SearchIssue::new(
                        Stage::Localization,
                        format!("{id}:{}", failure.field),
                        &failure.error,
                    ));
                }
                records.push(localized.record);
            }
            Err(e) => {
                warn!(recipe_id = %id, error = %e, "dropping candidate");
                issues.push(SearchIssue::new(Stage::RecipeLookup, id, &e));
            }
        }
    }
    records
}

#[derive(Clone)]
pub struct RankingEngine {
    source: Arc<dyn RecipeSource>,
    translator: Arc<dyn Translator>,
    localizer: Localizer,
    config: EngineConfig,
}

impl RankingEngine {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        translator: Arc<dyn Translator>,
        config: EngineConfig,
    ) -> Self {
        let localizer = Localizer::new(
            Arc::clone(&translator),
            config.catalog_locale.clone(),
            config.user_locale.clone(),
            config.concurrency,
        );
        Self {
            source,
            translator,
            localizer,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn source(&self) -> &dyn RecipeSource {
        self.source.as_ref()
    }

    fn concurrency(&self) -> usize {
        self.config.concurrency.max(1)
    }

    /// Translates user-locale text into the catalog locale, lowercased and trimmed.
    pub async fn to_catalog_term(&self, text: &str) -> Result<String, CommonError> {
        let translated = self
            .translator
            .translate(text, &self.config.user_locale, &self.config.catalog_locale)
            .await?;
        Ok(translated.trim().to_lowercase())
    }

    /// Step 1: one catalog term per pantry item, failures isolated per item.
    async fn query_terms(&self, pantry: &[String], issues: &mut Vec<SearchIssue>) -> Vec<String> {
        let translated: Vec<(String, Result<String, CommonError>)> = stream::iter(pantry.to_vec())
            .map(|item| async move {
                let term = self.to_catalog_term(&item).await;
                (item, term)
            })
            .buffered(self.concurrency())
            .collect()
            .await;

        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for (item, result) in translated {
            match result {
                Ok(term) if term.is_empty() => {
                    debug!(item = %item, "pantry item translated to nothing");
                }
                Ok(term) => {
                    if seen.insert(term.clone()) {
                        terms.push(term);
                    }
                }
                Err(e) => {
                    warn!(item = %item, error = %e, "pantry item translation failed");
                    issues.push(SearchIssue::new(Stage::PantryTranslation, item, &e));
                }
            }
        }
        terms
    }

    /// Step 2: union of ids across terms, first occurrence wins. Returns the ids and the
    /// number of terms whose lookup failed.
    async fn discover(&self, terms: &[String], issues: &mut Vec<SearchIssue>) -> (Vec<RecipeId>, usize) {
        let lookups: Vec<(String, Result<Vec<RecipeId>, CommonError>)> = stream::iter(terms.to_vec())
            .map(|term| async move {
                let ids = self.source.find_by_ingredient(&term).await;
                (term, ids)
            })
            .buffered(self.concurrency())
            .collect()
            .await;

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        let mut failed = 0;
        for (term, result) in lookups {
            match result {
                Ok(ids) => {
                    debug!(term = %term, hits = ids.len(), "ingredient lookup");
                    for id in ids {
                        if seen.insert(id.clone()) {
                            candidates.push(id);
                        }
                    }
                }
                Err(e) => {
                    warn!(term = %term, error = %e, "ingredient lookup failed");
                    issues.push(SearchIssue::new(Stage::IngredientLookup, term, &e));
                    failed += 1;
                }
            }
        }
        (candidates, failed)
    }

    /// Ranks recipes for `pantry`.
    ///
    /// `region_filter` is compared for exact equality with each recipe's localized
    /// region; `None` or the all-regions label disables it. At most `limit` recipes are
    /// returned, so a `limit` of 0 yields none.
    pub async fn rank<S: AsRef<str>>(
        &self,
        pantry: &[S],
        region_filter: Option<&str>,
        limit: usize,
    ) -> RankOutcome {
        let mut issues = Vec::new();

        let pantry = scoring::normalize_pantry(pantry);
        if pantry.is_empty() {
            return RankOutcome::empty(EmptyReason::NoPantry, issues, 0);
        }

        let terms = self.query_terms(&pantry, &mut issues).await;
        if terms.is_empty() {
            return RankOutcome::empty(EmptyReason::PantryUntranslatable, issues, 0);
        }

        let (mut ids, failed_terms) = self.discover(&terms, &mut issues).await;
        let discovered = ids.len();
        if ids.is_empty() {
            let reason = if failed_terms == terms.len() {
                EmptyReason::SourceUnavailable
            } else {
                EmptyReason::NoCandidates
            };
            return RankOutcome::empty(reason, issues, 0);
        }
        if ids.len() > self.config.max_candidates {
            info!(
                discovered,
                kept = self.config.max_candidates,
                "capping candidate set"
            );
            ids.truncate(self.config.max_candidates);
        }

        let fetched: Vec<(RecipeId, Result<Localized, CommonError>)> = stream::iter(ids)
            .map(|id| fetch_localized(self.source.as_ref(), &self.localizer, id))
            .buffered(self.concurrency())
            .collect()
            .await;
        let records = collect_fetched(fetched, &mut issues);
        if records.is_empty() {
            return RankOutcome::empty(EmptyReason::AllCandidatesFailed, issues, discovered);
        }

        let region = region_filter
            .map(str::trim)
            .filter(|r| !self.config.is_all_regions(r));
        let mut scored: Vec<ScoredRecipe> = records
            .into_iter()
            .filter(|record| region.map_or(true, |r| record.region == r))
            .map(|record| scoring::score(record, &pantry))
            .collect();
        if scored.is_empty() {
            return RankOutcome::empty(EmptyReason::FilteredOut, issues, discovered);
        }

        scoring::rank_by_matches(&mut scored);
        scored.truncate(limit);

        let status = if issues.is_empty() {
            SearchStatus::Complete
        } else {
            SearchStatus::Degraded
        };
        info!(
            pantry = pantry.len(),
            terms = terms.len(),
            candidates = discovered,
            returned = scored.len(),
            issues = issues.len(),
            "ranking complete"
        );
        RankOutcome {
            recipes: scored,
            status,
            issues,
            candidates: discovered,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{record, FakeSource, FakeTranslator};

    fn build(source: FakeSource, translator: FakeTranslator) -> (RankingEngine, Arc<FakeSource>) {
        let source = Arc::new(source);
        let engine = RankingEngine::new(
            source.clone(),
            Arc::new(translator),
            EngineConfig::default(),
        );
        (engine, source)
    }

    fn pantry_translator() -> FakeTranslator {
        FakeTranslator::new(&[
            ("frango", "Chicken"),
            ("arroz", "Rice "),
            ("chicken", "frango"),
            ("rice", "arroz"),
            ("salt", "sal"),
        ])
    }

    fn ids(outcome: &RankOutcome) -> Vec<&str> {
        outcome.recipes.iter().map(|r| r.id()).collect()
    }

    #[tokio::test]
    async fn ids_shared_between_terms_are_fetched_once() {
        let source = FakeSource::new()
            .with_ingredient("chicken", &["101", "102"])
            .with_ingredient("rice", &["102", "103"])
            .with_record(record("101", "Chicken", "Italian", &[("chicken", "")]))
            .with_record(record("102", "Chicken Rice", "Italian", &[("chicken", ""), ("rice", "")]))
            .with_record(record("103", "Rice", "Italian", &[("rice", "")]));
        let (engine, source) = build(source, pantry_translator());

        let outcome = engine.rank(&["frango", "arroz"], None, 10).await;

        assert_eq!(outcome.candidates, 3);
        assert_eq!(outcome.status, SearchStatus::Complete);
        assert_eq!(source.lookups_of("102"), 1);
        assert_eq!(source.total_lookups(), 3);
        let mut found = ids(&outcome);
        assert_eq!(found[0], "102");
        found.sort();
        assert_eq!(found, vec!["101", "102", "103"]);
    }

    #[tokio::test]
    async fn equal_scores_keep_discovery_order() {
        let source = FakeSource::new()
            .with_ingredient("chicken", &["A", "B", "C"])
            .with_record(record("A", "A", "x", &[("chicken", ""), ("rice", "")]))
            .with_record(record("B", "B", "x", &[("rice", ""), ("chicken", ""), ("salt", "")]))
            .with_record(record("C", "C", "x", &[("chicken", "")]));
        let (engine, _) = build(source, pantry_translator());

        let outcome = engine.rank(&["frango", "arroz"], None, 10).await;
        let scores: Vec<usize> = outcome.recipes.iter().map(|r| r.matches).collect();
        assert_eq!(scores, vec![2, 2, 1]);
        assert_eq!(ids(&outcome), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn results_are_truncated_to_the_top_scores() {
        let mut source = FakeSource::new();
        let mut all = Vec::new();
        for i in 0..15 {
            let id = format!("{i:02}");
            // recipes 00..04 match once, 05..14 match twice
            let lines: &[(&str, &str)] = if i < 5 {
                &[("chicken", ""), ("salt", "")]
            } else {
                &[("chicken", ""), ("rice", "")]
            };
            source = source.with_record(record(&id, &id, "x", lines));
            all.push(id);
        }
        let all_refs: Vec<&str> = all.iter().map(String::as_str).collect();
        let source = source.with_ingredient("chicken", &all_refs);
        let (engine, _) = build(source, pantry_translator());

        let outcome = engine.rank(&["frango", "arroz"], None, 10).await;
        assert_eq!(outcome.recipes.len(), 10);
        assert!(outcome.recipes.iter().all(|r| r.matches == 2));
        assert_eq!(ids(&outcome)[0], "05");
    }

    #[tokio::test]
    async fn slow_lookups_do_not_reorder_ties() {
        let source = FakeSource::new()
            .with_ingredient("chicken", &["A", "B", "C"])
            .with_record(record("A", "A", "x", &[("chicken", "")]))
            .with_record(record("B", "B", "x", &[("chicken", "")]))
            .with_record(record("C", "C", "x", &[("chicken", "")]))
            .slow_lookup("A", Duration::from_millis(80))
            .slow_lookup("B", Duration::from_millis(1))
            .slow_lookup("C", Duration::from_millis(1));
        let (engine, _) = build(source, pantry_translator());

        let outcome = engine.rank(&["frango"], None, 10).await;
        assert_eq!(ids(&outcome), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn zero_limit_returns_no_recipes() {
        let source = FakeSource::new()
            .with_ingredient("chicken", &["1", "2"])
            .with_record(record("1", "One", "x", &[("chicken", "")]))
            .with_record(record("2", "Two", "x", &[("chicken", "")]));
        let (engine, _) = build(source, pantry_translator());

        let outcome = engine.rank(&["frango"], None, 0).await;
        assert!(outcome.recipes.is_empty());
        assert_eq!(outcome.candidates, 2);

        let outcome = engine.rank(&["frango"], None, 1).await;
        assert_eq!(ids(&outcome), vec!["1"]);
    }

    #[tokio::test]
    async fn localization_across_candidates_respects_concurrency() {
        let mut source = FakeSource::new();
        let mut all = Vec::new();
        for i in 0..6 {
            let id = i.to_string();
            source = source.with_record(record(
                &id,
                &id,
                "x",
                &[("chicken", "1 kg"), ("rice", "2 cups"), ("salt", "1 pinch")],
            ));
            all.push(id);
        }
        let all_refs: Vec<&str> = all.iter().map(String::as_str).collect();
        let source = Arc::new(source.with_ingredient("chicken", &all_refs));
        let translator = Arc::new(pantry_translator().with_delay(Duration::from_millis(5)));
        let config = EngineConfig {
            concurrency: 3,
            ..EngineConfig::default()
        };
        let engine = RankingEngine::new(source, translator.clone(), config);

        let outcome = engine.rank(&["frango"], None, 10).await;
        assert_eq!(outcome.recipes.len(), 6);
        assert!(translator.peak_in_flight() <= 3);
    }

    #[tokio::test]
    async fn candidate_set_is_capped_in_discovery_order() {
        let mut source = FakeSource::new();
        let mut all = Vec::new();
        for i in 0..60 {
            let id = format!("{i:03}");
            source = source.with_record(record(&id, &id, "x", &[("chicken", "")]));
            all.push(id);
        }
        let all_refs: Vec<&str> = all.iter().map(String::as_str).collect();
        let source = source.with_ingredient("chicken", &all_refs);
        let (engine, source) = build(source, pantry_translator());

        let outcome = engine.rank(&["frango"], None, 100).await;
        assert_eq!(outcome.candidates, 60);
        assert_eq!(source.total_lookups(), 50);
        assert_eq!(source.lookups_of("049"), 1);
        assert_eq!(source.lookups_of("050"), 0);
        assert_eq!(outcome.recipes.len(), 50);
    }

    #[tokio::test]
    async fn region_filter_is_exact_on_localized_region() {
        let source = FakeSource::new()
            .with_ingredient("chicken", &["1"])
            .with_record(record("1", "Frango à parmegiana", "Italian", &[("Chicken", "")]));
        let translator = FakeTranslator::new(&[
            ("frango", "chicken"),
            ("Italian", "Italiano"),
            ("Chicken", "frango"),
        ]);
        let (engine, _) = build(source, translator);

        let excluded = engine.rank(&["frango"], Some("França"), 10).await;
        assert!(excluded.recipes.is_empty());
        assert_eq!(excluded.status, SearchStatus::Empty(EmptyReason::FilteredOut));

        let lowercase = engine.rank(&["frango"], Some("italiano"), 10).await;
        assert!(lowercase.recipes.is_empty());

        let included = engine.rank(&["frango"], Some("Italiano"), 10).await;
        assert_eq!(ids(&included), vec!["1"]);
        assert_eq!(included.recipes[0].matches, 1);

        let all = engine.rank(&["frango"], Some("Todos"), 10).await;
        assert_eq!(ids(&all), vec!["1"]);
    }

    #[tokio::test]
    async fn failing_pantry_item_does_not_abort_search() {
        let source = FakeSource::new()
            .with_ingredient("rice", &["1"])
            .with_record(record("1", "Rice", "x", &[("rice", "")]));
        let translator = pantry_translator().failing_on(&["frango"]);
        let (engine, _) = build(source, translator);

        let outcome = engine.rank(&["frango", "arroz"], None, 10).await;
        assert_eq!(ids(&outcome), vec!["1"]);
        assert_eq!(outcome.status, SearchStatus::Degraded);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].stage, Stage::PantryTranslation);
        assert_eq!(outcome.issues[0].subject, "frango");
    }

    #[tokio::test]
    async fn unfetchable_candidate_is_dropped() {
        let source = FakeSource::new()
            .with_ingredient("chicken", &["1", "ghost"])
            .with_record(record("1", "Chicken", "x", &[("chicken", "")]));
        let (engine, _) = build(source, pantry_translator());

        let outcome = engine.rank(&["frango"], None, 10).await;
        assert_eq!(ids(&outcome), vec!["1"]);
        assert_eq!(outcome.status, SearchStatus::Degraded);
        assert_eq!(outcome.issues[0].stage, Stage::RecipeLookup);
        assert_eq!(outcome.issues[0].subject, "ghost");
    }

    #[tokio::test]
    async fn empty_outcomes_carry_a_reason() {
        let (engine, _) = build(FakeSource::new(), pantry_translator());
        let outcome = engine.rank(&["  ", ""], None, 10).await;
        assert_eq!(outcome.status, SearchStatus::Empty(EmptyReason::NoPantry));

        let (engine, _) = build(FakeSource::new(), pantry_translator().failing_on(&["frango"]));
        let outcome = engine.rank(&["frango"], None, 10).await;
        assert_eq!(outcome.status, SearchStatus::Empty(EmptyReason::PantryUntranslatable));

        let (engine, _) = build(FakeSource::new(), pantry_translator());
        let outcome = engine.rank(&["frango"], None, 10).await;
        assert_eq!(outcome.status, SearchStatus::Empty(EmptyReason::NoCandidates));

        let source = FakeSource::new().failing_term("chicken").failing_term("rice");
        let (engine, _) = build(source, pantry_translator());
        let outcome = engine.rank(&["frango", "arroz"], None, 10).await;
        assert_eq!(outcome.status, SearchStatus::Empty(EmptyReason::SourceUnavailable));
        assert_eq!(outcome.issues.len(), 2);

        let source = FakeSource::new().with_ingredient("chicken", &["ghost"]);
        let (engine, _) = build(source, pantry_translator());
        let outcome = engine.rank(&["frango"], None, 10).await;
        assert_eq!(outcome.status, SearchStatus::Empty(EmptyReason::AllCandidatesFailed));
    }

    #[tokio::test]
    async fn synonyms_translating_to_one_term_are_looked_up_once() {
        let source = FakeSource::new()
            .with_ingredient("chicken", &["1"])
            .with_record(record("1", "Chicken", "x", &[("chicken", "")]));
        let translator = FakeTranslator::new(&[("frango", "chicken"), ("galinha", "Chicken")]);
        let (engine, source) = build(source, translator);

        let outcome = engine.rank(&["frango", "galinha"], None, 10).await;
        assert_eq!(ids(&outcome), vec!["1"]);
        assert_eq!(source.total_lookups(), 1);
    }

    #[test]
    fn all_regions_sentinel() {
        let config = EngineConfig::default();
        assert!(config.is_all_regions("Todos"));
        assert!(config.is_all_regions("all"));
        assert!(config.is_all_regions(" "));
        assert!(!config.is_all_regions("todos"));
        assert!(!config.is_all_regions("Italiano"));
    }
}
