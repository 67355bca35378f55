/// TheMealDB catalog client.
///
/// Endpoints used (relative to `MEALDB_BASE_URL`):
/// - `filter.php?i={ingredient}`: summaries of meals using an ingredient
/// - `filter.php?a={area}`: summaries of meals from a region
/// - `lookup.php?i={id}`: one full meal
/// - `list.php?a=list`: every region name
///
/// All of them wrap their rows in `{"meals": [...]}` and answer `{"meals": null}` when
/// nothing matches. Full meals carry twenty numbered `strIngredientN`/`strMeasureN`
/// slots which are folded into `IngredientLine`s here and go no further.
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CommonError;
use crate::http::{self, RequestError, RetryPolicy};
use crate::model::{IngredientLine, RecipeId, RecipeRecord, RecipeSummary};

const INGREDIENT_SLOTS: usize = 20;

#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn find_by_ingredient(&self, term: &str) -> Result<Vec<RecipeId>, CommonError>;

    async fn lookup_by_id(&self, id: &str) -> Result<RecipeRecord, CommonError>;

    async fn find_by_region(&self, region: &str) -> Result<Vec<RecipeSummary>, CommonError>;

    /// Region names in alphabetical order.
    async fn list_regions(&self) -> Result<Vec<String>, CommonError>;
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub max_error_body_bytes: usize,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("MEALDB_BASE_URL")
            .unwrap_or_else(|_| "https://www.themealdb.com/api/json/v1/1".to_string());

        let timeout = http::env_var::<u64>("MEALDB_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        let retry = RetryPolicy {
            max_retries: http::env_var("MEALDB_MAX_RETRIES").unwrap_or(2),
            initial_backoff: http::env_var::<u64>("MEALDB_RETRY_INITIAL_MS")
                .map(Duration::from_millis)
                .unwrap_or_else(|| Duration::from_millis(200)),
            max_backoff: http::env_var::<u64>("MEALDB_RETRY_MAX_MS")
                .map(Duration::from_millis)
                .unwrap_or_else(|| Duration::from_millis(3_000)),
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            retry,
            max_error_body_bytes: 4 * 1024,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    #[serde(default = "Option::default")]
    meals: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct MealRow {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal", default)]
    title: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AreaRow {
    #[serde(rename = "strArea")]
    area: Option<String>,
}

#[derive(Clone)]
pub struct MealDbClient {
    config: CatalogConfig,
    http: reqwest::Client,
}

impl MealDbClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CommonError> {
        let http = http::build_client("recipe-finder/catalog")
            .map_err(|e| CommonError::Http(e.to_string()))?;
        Ok(Self { config, http })
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CommonError> {
        let url = format!("{}/{endpoint}", self.config.base_url);
        let envelope = http::with_retry(&self.config.retry, "mealdb", || async {
            http::get_json::<MealsEnvelope<T>>(
                &self.http,
                &url,
                query,
                self.config.timeout,
                self.config.max_error_body_bytes,
            )
            .await
        })
        .await
        .map_err(catalog_error)?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

fn catalog_error(err: RequestError) -> CommonError {
    match err {
        RequestError::InvalidJson(e) => CommonError::MalformedRecord(e.to_string()),
        other => CommonError::SourceUnavailable(other.to_string()),
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn find_by_ingredient(&self, term: &str) -> Result<Vec<RecipeId>, CommonError> {
        let rows: Vec<MealRow> = self.fetch("filter.php", &[("i", term)]).await?;
        debug!(term, hits = rows.len(), "ingredient lookup");
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<RecipeRecord, CommonError> {
        let mut meals: Vec<Map<String, Value>> = self.fetch("lookup.php", &[("i", id)]).await?;
        if meals.is_empty() {
            return Err(CommonError::MalformedRecord(format!("no meal returned for id {id}")));
        }
        record_from_meal(&meals.swap_remove(0))
    }

    async fn find_by_region(&self, region: &str) -> Result<Vec<RecipeSummary>, CommonError> {
        let rows: Vec<MealRow> = self.fetch("filter.php", &[("a", region)]).await?;
        Ok(rows
            .into_iter()
            .map(|row| RecipeSummary {
                id: row.id,
                title: row.title.unwrap_or_default(),
                image_url: row.thumb.filter(|t| !t.trim().is_empty()),
            })
            .collect())
    }

    async fn list_regions(&self) -> Result<Vec<String>, CommonError> {
        let rows: Vec<AreaRow> = self.fetch("list.php", &[("a", "list")]).await?;
        let mut regions: Vec<String> = rows
            .into_iter()
            .filter_map(|row| row.area)
            .map(|area| area.trim().to_string())
            .filter(|area| !area.is_empty())
            .collect();
        regions.sort();
        regions.dedup();
        Ok(regions)
    }
}

/// Non-empty trimmed string value of `key`, treating null and blank as absent.
fn text_field(meal: &Map<String, Value>, key: &str) -> Option<String> {
    meal.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Converts one `lookup.php` meal into a `RecipeRecord`.
///
/// A slot is kept only when its ingredient is present; a measure standing alone is
/// dropped. Ingredient lines keep slot order.
pub fn record_from_meal(meal: &Map<String, Value>) -> Result<RecipeRecord, CommonError> {
    let id = text_field(meal, "idMeal")
        .ok_or_else(|| CommonError::MalformedRecord("meal without idMeal".to_string()))?;
    let title = text_field(meal, "strMeal")
        .ok_or_else(|| CommonError::MalformedRecord(format!("meal {id} without strMeal")))?;

    let ingredients = (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let name = text_field(meal, &format!("strIngredient{slot}"))?;
            let measure = text_field(meal, &format!("strMeasure{slot}")).unwrap_or_default();
            Some(IngredientLine { name, measure })
        })
        .collect();

    Ok(RecipeRecord {
        id,
        title,
        category: text_field(meal, "strCategory").unwrap_or_default(),
        region: text_field(meal, "strArea").unwrap_or_default(),
        instructions: text_field(meal, "strInstructions").unwrap_or_default(),
        image_url: text_field(meal, "strMealThumb"),
        source_url: text_field(meal, "strSource"),
        video_url: text_field(meal, "strYoutube"),
        ingredients,
    })
}
