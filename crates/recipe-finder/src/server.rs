/// MCP server implementation for recipe discovery.
///
/// Exposes nine tools:
/// - `find_recipes`: rank recipes against a pantry, optionally within one region
/// - `list_regions`: localized region names for filtering and browsing
/// - `recipes_by_region`: a handful of typical recipes from one region
/// - `get_recipe`: any recipe shown earlier in the session
/// - `rate_recipe` / `list_ratings`: session ratings from 1 to 5
/// - `list_saved_recipes` / `remove_saved_recipe`: best match of each search
/// - `search_history`: previous searches in this session
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::RwLock;
use tracing::info;

use recipe_core::engine::RankingEngine;
use recipe_core::explore::RegionExplorer;
use recipe_core::mcp_api::{
    FindRecipesParams, FindRecipesResponse, OkResponse, RateRecipeParams, RatingEntry,
    RatingsResponse, RecipeIdParams, RecipeView, RegionListResponse, RegionRecipesParams,
    RegionRecipesResponse, SavedRecipesResponse, SearchHistoryResponse,
};

use crate::session::Session;

const MAX_FIND_LIMIT: u32 = 50;
const MAX_BROWSE_LIMIT: u32 = 20;

#[derive(Clone)]
pub struct RecipeFinderServer {
    engine: Arc<RankingEngine>,
    explorer: Arc<RegionExplorer>,
    session: Arc<RwLock<Session>>,
    tool_router: ToolRouter<RecipeFinderServer>,
}

impl RecipeFinderServer {
    pub fn new(engine: RankingEngine) -> Self {
        let explorer = Arc::new(RegionExplorer::new(engine.clone()));
        Self {
            engine: Arc::new(engine),
            explorer,
            session: Arc::new(RwLock::new(Session::new())),
            tool_router: Self::tool_router(),
        }
    }

    /// Same engine, empty session. Used once per TCP client.
    pub fn with_fresh_session(&self) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            ..self.clone()
        }
    }
}

#[tool_router]
impl RecipeFinderServer {
    #[tool(description = "Find recipes that use the given ingredients. Ingredients are in the user's language; results are translated back, ranked by how many of their ingredient lines match, and include a status telling 'no matches' apart from 'service degraded'.")]
    async fn find_recipes(
        &self,
        Parameters(params): Parameters<FindRecipesParams>,
    ) -> Result<Json<FindRecipesResponse>, String> {
        let pantry: Vec<String> = params
            .ingredients
            .iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        if pantry.is_empty() {
            return Err("ingredients must not be empty".to_string());
        }

        let limit = params
            .limit
            .map(|l| l.clamp(1, MAX_FIND_LIMIT) as usize)
            .unwrap_or(self.engine.config().default_limit);
        let region = params
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        let outcome = self.engine.rank(&pantry, region, limit).await;

        let mut session = self.session.write().await;
        session.remember_search(&pantry, region, &outcome);
        info!(
            ingredients = pantry.len(),
            returned = outcome.recipes.len(),
            searches = session.searches(),
            "search recorded"
        );

        let recipes = outcome
            .recipes
            .iter()
            .map(|scored| RecipeView::from_scored(scored, session.rating(scored.id())))
            .collect();
        Ok(Json(FindRecipesResponse {
            status: outcome.status,
            candidates: outcome.candidates,
            recipes,
            issues: outcome.issues,
        }))
    }

    #[tool(description = "List regions (countries/cuisines) in the user's language. The first entry is the label meaning 'all regions'.")]
    async fn list_regions(&self) -> Result<Json<RegionListResponse>, String> {
        let list = self.explorer.localized_regions().await;
        Ok(Json(RegionListResponse {
            regions: list.regions,
            issues: list.issues,
        }))
    }

    #[tool(description = "Show typical recipes from one region. The region is given in the user's language, as returned by list_regions.")]
    async fn recipes_by_region(
        &self,
        Parameters(params): Parameters<RegionRecipesParams>,
    ) -> Result<Json<RegionRecipesResponse>, String> {
        let region = params.region.trim().to_string();
        if region.is_empty() {
            return Err("region must not be empty".to_string());
        }

        let catalog_region = self
            .explorer
            .catalog_region(&region)
            .await
            .map_err(|e| format!("could not translate region: {e}"))?
            .ok_or_else(|| {
                format!(
                    "'{}' covers every region; choose a specific one from list_regions",
                    self.engine.config().all_regions_label
                )
            })?;

        let limit = params.limit.map(|l| l.clamp(1, MAX_BROWSE_LIMIT) as usize);
        let outcome = self.explorer.browse_region(&catalog_region, limit).await;

        let mut session = self.session.write().await;
        session.remember_browsed(&outcome.recipes);
        let recipes = outcome
            .recipes
            .iter()
            .map(|record| RecipeView::from_record(record, session.rating(&record.id)))
            .collect();
        Ok(Json(RegionRecipesResponse {
            region,
            catalog_region,
            status: outcome.status,
            recipes,
            issues: outcome.issues,
        }))
    }

    #[tool(description = "Get the full details of a recipe shown earlier in this session.")]
    async fn get_recipe(
        &self,
        Parameters(params): Parameters<RecipeIdParams>,
    ) -> Result<Json<RecipeView>, String> {
        let session = self.session.read().await;
        let seen = session
            .recipe(&params.recipe_id)
            .ok_or_else(|| format!("unknown recipe id: {}", params.recipe_id))?;
        Ok(Json(seen.view(session.rating(&params.recipe_id))))
    }

    #[tool(description = "Rate a recipe shown earlier in this session from 1 to 5. Rating again replaces the previous rating.")]
    async fn rate_recipe(
        &self,
        Parameters(params): Parameters<RateRecipeParams>,
    ) -> Result<Json<RatingEntry>, String> {
        let mut session = self.session.write().await;
        session
            .rate(&params.recipe_id, params.rating)
            .map_err(|e| e.to_string())?;
        let title = session
            .recipe(&params.recipe_id)
            .map(|seen| seen.title().to_string())
            .unwrap_or_default();
        Ok(Json(RatingEntry {
            recipe_id: params.recipe_id,
            title,
            rating: params.rating,
        }))
    }

    #[tool(description = "List this session's rated recipes, highest rating first.")]
    async fn list_ratings(&self) -> Result<Json<RatingsResponse>, String> {
        let session = self.session.read().await;
        Ok(Json(RatingsResponse {
            ratings: session.ratings(),
        }))
    }

    #[tool(description = "List saved recipes: the best match of every search in this session, most recent first.")]
    async fn list_saved_recipes(&self) -> Result<Json<SavedRecipesResponse>, String> {
        let session = self.session.read().await;
        Ok(Json(SavedRecipesResponse {
            recipes: session.saved(),
        }))
    }

    #[tool(description = "Remove a recipe from the saved list.")]
    async fn remove_saved_recipe(
        &self,
        Parameters(params): Parameters<RecipeIdParams>,
    ) -> Result<Json<OkResponse>, String> {
        let mut session = self.session.write().await;
        if !session.remove_saved(&params.recipe_id) {
            return Err(format!("recipe {} is not saved", params.recipe_id));
        }
        Ok(Json(OkResponse { ok: true }))
    }

    #[tool(description = "List previous searches in this session, most recent first.")]
    async fn search_history(&self) -> Result<Json<SearchHistoryResponse>, String> {
        let session = self.session.read().await;
        Ok(Json(SearchHistoryResponse {
            searches: session.history(),
        }))
    }
}

#[tool_handler]
impl ServerHandler for RecipeFinderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipe-finder".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe discovery MCP server. Call find_recipes with the ingredients at hand \
(in the user's language) to get recipes ranked by ingredient overlap. Use list_regions to get \
region names for the optional region filter or for recipes_by_region. Recipes returned in this \
session can be fetched again with get_recipe and rated with rate_recipe; list_ratings, \
list_saved_recipes and search_history show the session so far."
                    .to_string(),
            ),
        }
    }
}
