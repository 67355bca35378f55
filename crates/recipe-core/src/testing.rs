//! In-memory translator and catalog used by unit tests.
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::RecipeSource;
use crate::error::CommonError;
use crate::model::{IngredientLine, RecipeId, RecipeRecord, RecipeSummary};
use crate::translate::Translator;

pub fn record(id: &str, title: &str, region: &str, lines: &[(&str, &str)]) -> RecipeRecord {
    RecipeRecord {
        id: id.to_string(),
        title: title.to_string(),
        category: "Prato".to_string(),
        region: region.to_string(),
        instructions: "Cozinhe.".to_string(),
        image_url: None,
        source_url: None,
        video_url: None,
        ingredients: lines
            .iter()
            .map(|(name, measure)| IngredientLine {
                name: name.to_string(),
                measure: measure.to_string(),
            })
            .collect(),
    }
}

/// Dictionary translator: known phrases are replaced, unknown ones pass through.
#[derive(Default)]
pub struct FakeTranslator {
    dictionary: HashMap<String, String>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeTranslator {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            dictionary: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, texts: &[&str]) -> Self {
        self.failing = texts.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Every translation takes `delay`, so concurrent calls overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Most translations that were ever running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, CommonError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }
        if let Some(delay) = self.delay {
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(running, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        if self.failing.contains(text) {
            return Err(CommonError::Translation(format!("cannot translate {text:?}")));
        }
        Ok(self
            .dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}

#[derive(Default)]
pub struct FakeSource {
    by_ingredient: HashMap<String, Vec<RecipeId>>,
    by_region: HashMap<String, Vec<RecipeId>>,
    records: HashMap<RecipeId, RecipeRecord>,
    regions: Vec<String>,
    failing_terms: HashSet<String>,
    regions_unavailable: bool,
    lookup_delays: HashMap<RecipeId, Duration>,
    lookups: Mutex<HashMap<RecipeId, usize>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ingredient(mut self, term: &str, ids: &[&str]) -> Self {
        self.by_ingredient
            .insert(term.to_string(), ids.iter().map(|id| id.to_string()).collect());
        self
    }

    pub fn with_region(mut self, region: &str, ids: &[&str]) -> Self {
        self.by_region
            .insert(region.to_string(), ids.iter().map(|id| id.to_string()).collect());
        self.regions.push(region.to_string());
        self
    }

    pub fn with_record(mut self, record: RecipeRecord) -> Self {
        self.records.insert(record.id.clone(), record);
        self
    }

    pub fn failing_term(mut self, term: &str) -> Self {
        self.failing_terms.insert(term.to_string());
        self
    }

    /// Makes `lookup_by_id(id)` answer only after `delay`.
    pub fn slow_lookup(mut self, id: &str, delay: Duration) -> Self {
        self.lookup_delays.insert(id.to_string(), delay);
        self
    }

    pub fn regions_unavailable(mut self) -> Self {
        self.regions_unavailable = true;
        self
    }

    pub fn lookups_of(&self, id: &str) -> usize {
        self.lookups
            .lock()
            .ok()
            .and_then(|l| l.get(id).copied())
            .unwrap_or(0)
    }

    pub fn total_lookups(&self) -> usize {
        self.lookups.lock().map(|l| l.values().sum()).unwrap_or(0)
    }
}

#[async_trait]
impl RecipeSource for FakeSource {
    async fn find_by_ingredient(&self, term: &str) -> Result<Vec<RecipeId>, CommonError> {
        if self.failing_terms.contains(term) {
            return Err(CommonError::SourceUnavailable(format!("lookup for {term} failed")));
        }
        Ok(self.by_ingredient.get(term).cloned().unwrap_or_default())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<RecipeRecord, CommonError> {
        if let Ok(mut lookups) = self.lookups.lock() {
            *lookups.entry(id.to_string()).or_insert(0) += 1;
        }
        if let Some(delay) = self.lookup_delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| CommonError::MalformedRecord(format!("no meal with id {id}")))
    }

    async fn find_by_region(&self, region: &str) -> Result<Vec<RecipeSummary>, CommonError> {
        let ids = self.by_region.get(region).cloned().unwrap_or_default();
        Ok(ids
            .into_iter()
            .map(|id| RecipeSummary {
                title: self
                    .records
                    .get(&id)
                    .map(|r| r.title.clone())
                    .unwrap_or_default(),
                id,
                image_url: None,
            })
            .collect())
    }

    async fn list_regions(&self) -> Result<Vec<String>, CommonError> {
        if self.regions_unavailable {
            return Err(CommonError::SourceUnavailable("list endpoint down".to_string()));
        }
        let mut regions = self.regions.clone();
        regions.sort();
        Ok(regions)
    }
}
