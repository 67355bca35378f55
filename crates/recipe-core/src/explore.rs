/// Browsing the catalog by region.
///
/// Region names travel in two directions: the catalog lists them in its own locale and
/// they are shown localized, while a region picked by the user has to be translated back
/// before the catalog can be queried by it.
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::catalog::RecipeSource;
use crate::engine::{
    collect_fetched, fetch_localized, EmptyReason, EngineConfig, RankingEngine, SearchIssue,
    SearchStatus, Stage,
};
use crate::error::CommonError;
use crate::localize::Localized;
use crate::model::{RecipeId, RecipeRecord};

#[derive(Debug, Clone)]
pub struct RegionList {
    /// The all-regions label first, then localized region names in catalog order.
    pub regions: Vec<String>,
    pub issues: Vec<SearchIssue>,
}

#[derive(Debug, Clone)]
pub struct BrowseOutcome {
    pub region: String,
    pub recipes: Vec<RecipeRecord>,
    pub status: SearchStatus,
    pub issues: Vec<SearchIssue>,
}

#[derive(Clone)]
pub struct RegionExplorer {
    engine: RankingEngine,
}

impl RegionExplorer {
    pub fn new(engine: RankingEngine) -> Self {
        Self { engine }
    }

    fn source(&self) -> &dyn RecipeSource {
        self.engine.source()
    }

    fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Localized region names for a picker.
    ///
    /// A region whose name fails to translate is listed under its catalog name. When the
    /// catalog itself is unreachable only the all-regions label is returned.
    pub async fn localized_regions(&self) -> RegionList {
        let mut regions = vec![self.config().all_regions_label.clone()];
        let mut issues = Vec::new();

        let names = match self.source().list_regions().await {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "region list unavailable");
                issues.push(SearchIssue::new(Stage::RegionList, "list", &e));
                return RegionList { regions, issues };
            }
        };

        let localizer = self.engine.localizer();
        let translated: Vec<(String, Result<String, CommonError>)> = stream::iter(names)
            .map(|name| async move {
                let localized = localizer.translate_text(&name).await;
                (name, localized)
            })
            .buffered(self.config().concurrency.max(1))
            .collect()
            .await;

        for (name, result) in translated {
            match result {
                Ok(localized) => regions.push(localized),
                Err(e) => {
                    issues.push(SearchIssue::new(Stage::Localization, name.clone(), &e));
                    regions.push(name);
                }
            }
        }
        RegionList { regions, issues }
    }

    /// Translates a user-locale region name into the catalog's name for it.
    ///
    /// Returns `None` for the all-regions label, which has no catalog counterpart.
    pub async fn catalog_region(&self, region: &str) -> Result<Option<String>, CommonError> {
        if self.config().is_all_regions(region) {
            return Ok(None);
        }
        let translated = self.engine.to_catalog_term(region).await?;
        Ok(Some(capitalize_words(&translated)))
    }

    /// Up to `limit` localized recipes from `region`, which must already be in the
    /// catalog locale.
    pub async fn browse_region(&self, region: &str, limit: Option<usize>) -> BrowseOutcome {
        let limit = limit.unwrap_or(self.config().region_browse_limit).max(1);
        let mut issues = Vec::new();

        let summaries = match self.source().find_by_region(region).await {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!(region, error = %e, "region lookup failed");
                issues.push(SearchIssue::new(Stage::RegionLookup, region, &e));
                return BrowseOutcome {
                    region: region.to_string(),
                    recipes: Vec::new(),
                    status: SearchStatus::Empty(EmptyReason::SourceUnavailable),
                    issues,
                };
            }
        };
        if summaries.is_empty() {
            return BrowseOutcome {
                region: region.to_string(),
                recipes: Vec::new(),
                status: SearchStatus::Empty(EmptyReason::NoCandidates),
                issues,
            };
        }

        let ids: Vec<RecipeId> = summaries.into_iter().take(limit).map(|s| s.id).collect();
        let localizer = self.engine.localizer();
        let fetched: Vec<(RecipeId, Result<Localized, CommonError>)> = stream::iter(ids)
            .map(|id| fetch_localized(self.source(), localizer, id))
            .buffered(self.config().concurrency.max(1))
            .collect()
            .await;
        let recipes = collect_fetched(fetched, &mut issues);

        let status = if recipes.is_empty() {
            SearchStatus::Empty(EmptyReason::AllCandidatesFailed)
        } else if issues.is_empty() {
            SearchStatus::Complete
        } else {
            SearchStatus::Degraded
        };
        info!(region, returned = recipes.len(), issues = issues.len(), "region browse complete");
        BrowseOutcome {
            region: region.to_string(),
            recipes,
            status,
            issues,
        }
    }
}

/// The catalog names regions in title case ("Italian"); translated terms come back
/// lowercased.
fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
