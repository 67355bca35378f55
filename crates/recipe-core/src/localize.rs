use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tracing::warn;

use crate::error::CommonError;
use crate::model::RecipeRecord;
use crate::translate::Translator;

/// Which translatable field of a record failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordField {
    Title,
    Category,
    Region,
    Instructions,
    Ingredient(usize),
    Measure(usize),
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordField::Title => f.write_str("title"),
            RecordField::Category => f.write_str("category"),
            RecordField::Region => f.write_str("region"),
            RecordField::Instructions => f.write_str("instructions"),
            RecordField::Ingredient(i) => write!(f, "ingredient[{i}]"),
            RecordField::Measure(i) => write!(f, "measure[{i}]"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldFailure {
    pub field: RecordField,
    pub error: CommonError,
}

/// A record after localization. Fields listed in `failures` are still in the catalog locale.
#[derive(Debug, Clone)]
pub struct Localized {
    pub record: RecipeRecord,
    pub failures: Vec<FieldFailure>,
}

impl Localized {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Clones share one pool of translation permits, so records localized side by side
/// never have more than `concurrency` translations in flight between them.
#[derive(Clone)]
pub struct Localizer {
    translator: Arc<dyn Translator>,
    source_locale: String,
    target_locale: String,
    concurrency: usize,
    permits: Arc<Semaphore>,
}

impl Localizer {
    pub fn new(
        translator: Arc<dyn Translator>,
        source_locale: impl Into<String>,
        target_locale: impl Into<String>,
        concurrency: usize,
    ) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            translator,
            source_locale: source_locale.into(),
            target_locale: target_locale.into(),
            concurrency,
            permits: Arc::new(Semaphore::new(concurrency)),
        }
    }

    /// Translates a single string, passing blank input through untouched.
    pub async fn translate_text(&self, text: &str) -> Result<String, CommonError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| CommonError::Translation(e.to_string()))?;
        self.translator
            .translate(text.trim(), &self.source_locale, &self.target_locale)
            .await
    }

    /// Translates every free-text field of `record`.
    ///
    /// Fields are translated independently; a failed field keeps its original text and
    /// is reported, the record itself is always returned.
    pub async fn localize(&self, record: RecipeRecord) -> Localized {
        let mut jobs: Vec<(RecordField, String)> = vec![
            (RecordField::Title, record.title.clone()),
            (RecordField::Category, record.category.clone()),
            (RecordField::Region, record.region.clone()),
            (RecordField::Instructions, record.instructions.clone()),
        ];
        for (i, line) in record.ingredients.iter().enumerate() {
            if !line.name.trim().is_empty() {
                jobs.push((RecordField::Ingredient(i), line.name.clone()));
            }
            if !line.measure.trim().is_empty() {
                jobs.push((RecordField::Measure(i), line.measure.clone()));
            }
        }

        let results: Vec<(RecordField, Result<String, CommonError>)> = stream::iter(jobs)
            .map(|(field, text)| async move {
                let translated = self.translate_text(&text).await;
                (field, translated)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut record = record;
        let mut failures = Vec::new();
        for (field, result) in results {
            match result {
                Ok(text) => apply(&mut record, &field, text),
                Err(error) => failures.push(FieldFailure { field, error }),
            }
        }

        if !failures.is_empty() {
            warn!(
                recipe_id = %record.id,
                failed_fields = failures.len(),
                "recipe partially localized"
            );
        }
        Localized { record, failures }
    }
}

fn apply(record: &mut RecipeRecord, field: &RecordField, text: String) {
    match field {
        RecordField::Title => record.title = text,
        RecordField::Category => record.category = text,
        RecordField::Region => record.region = text,
        RecordField::Instructions => record.instructions = text,
        RecordField::Ingredient(i) => {
            if let Some(line) = record.ingredients.get_mut(*i) {
                line.name = text;
            }
        }
        RecordField::Measure(i) => {
            if let Some(line) = record.ingredients.get_mut(*i) {
                line.measure = text;
            }
        }
    }
}
