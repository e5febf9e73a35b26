use std::sync::Arc;

use rmcp::Json;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, GetPromptRequestParams, GetPromptResult, ListPromptsResult, ListResourcesResult,
    PaginatedRequestParams, RawResource, ReadResourceRequestParams, ReadResourceResult,
    ResourceContents,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer};
use rmcp::{prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router};

use app_baseball_client::level::raw_level_from_json;
use app_baseball_client::practice::to_child_id;
use app_baseball_client::utils::{non_blank, parse_date};
use app_baseball_client::{
    AppBaseballClient, Comment, CoachSummary, DailyReportCreate, EvaluationCreate,
    EvaluationReceipt, Level, Player, PracticeLog, PracticeLogCreate, Recommender,
    SkillCategory, SkillLevels, WeekendJournal, clamp_level,
};

pub mod error;
pub mod http;
pub mod logging;
mod prompts;
pub mod rubric_source;
#[cfg(test)]
mod test_utils;
pub mod types;

pub use error::{McpError, McpResult};
pub use types::*;

pub const RUBRIC_RESOURCE_URI: &str = "app-baseball://rubric";
pub const TRAINING_MENU_RESOURCE_URI: &str = "app-baseball://training-menu";

#[derive(Clone)]
pub struct AppBaseballMcpHandler {
    client: Arc<dyn AppBaseballClient>,
    recommender: Arc<Recommender>,
    tool_router: rmcp::handler::server::tool::ToolRouter<AppBaseballMcpHandler>,
    prompt_router: rmcp::handler::server::router::prompt::PromptRouter<AppBaseballMcpHandler>,
}

fn parse_category(raw: &str) -> McpResult<SkillCategory> {
    Ok(raw.parse::<SkillCategory>()?)
}

fn level_from_json(value: &serde_json::Value) -> Level {
    clamp_level(raw_level_from_json(value))
}

fn practice_date_or_today(raw: Option<&str>) -> McpResult<chrono::NaiveDate> {
    match non_blank(raw) {
        None => Ok(chrono::Local::now().date_naive()),
        Some(s) => parse_date(&s)
            .ok_or_else(|| McpError::Validation(format!("invalid practice_date: {s}"))),
    }
}

/// Domain operations shared by MCP tools and the HTTP routes.
impl AppBaseballMcpHandler {
    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn client(&self) -> &Arc<dyn AppBaseballClient> {
        &self.client
    }

    pub fn pick_menu_view(
        &self,
        category: &str,
        level: &serde_json::Value,
    ) -> McpResult<PickMenuResult> {
        let category = parse_category(category)?;
        let level = level_from_json(level);
        let menu = self.recommender.pick_menu(category, level).cloned();
        let message = menu
            .is_none()
            .then(|| format!("no training menu covers {category} level {level}"));
        Ok(PickMenuResult {
            category,
            level: level.get(),
            menu,
            message,
        })
    }

    pub fn describe_level_view(
        &self,
        category: &str,
        level: &serde_json::Value,
    ) -> McpResult<DescribeLevelResult> {
        let category = parse_category(category)?;
        let level = level_from_json(level);
        let described = self
            .recommender
            .describe_level(category, level)
            .ok_or_else(|| {
                McpError::NotFound(format!("no description for {category} level {level}"))
            })?;
        Ok(DescribeLevelResult {
            category,
            label: category.label().to_string(),
            current: described.current.clone(),
            next: described.next.cloned(),
        })
    }

    pub fn focus_view(&self, levels: &SkillLevels) -> FocusResult {
        let focus = self.recommender.resolve_focus(levels);
        FocusResult {
            category: focus.category,
            label: focus.category.label().to_string(),
            level: focus.level.get(),
            menu: focus.menu.cloned(),
        }
    }

    /// Focus skill, level descriptions and menu from the player's latest
    /// evaluation. A player with no evaluation reads as level 10 everywhere.
    pub async fn recommendation(&self, player_id: &str) -> McpResult<RecommendationResult> {
        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(McpError::Validation("player_id must not be empty".into()));
        }
        let snapshot = self.client.get_latest_evaluation(player_id).await?;
        let has_evaluation = snapshot.is_some();
        let snapshot = snapshot.unwrap_or_default();

        let focus = self.focus_view(&snapshot.values);
        metrics::counter!(
            "app_baseball_recommendations_total",
            "focus" => focus.category.key()
        )
        .increment(1);
        tracing::debug!(player_id, focus = %focus.category, level = focus.level, "recommendation");

        let level = snapshot.values.get(focus.category);
        let described = self.recommender.describe_level(focus.category, level);
        Ok(RecommendationResult {
            player_id: player_id.to_string(),
            has_evaluation,
            evaluated_at: snapshot
                .evaluated_at
                .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string()),
            levels: snapshot.values,
            current: described.map(|d| d.current.clone()),
            next: described.and_then(|d| d.next.cloned()),
            focus,
            comment: snapshot.comment,
        })
    }

    pub fn rubric_view(&self, category: Option<&str>) -> McpResult<RubricResult> {
        let categories = match non_blank(category) {
            Some(c) => vec![parse_category(&c)?],
            None => SkillCategory::ALL.to_vec(),
        };
        let rubric = self.recommender.rubric();
        Ok(RubricResult {
            categories: categories
                .into_iter()
                .map(|category| RubricCategoryView {
                    category,
                    label: category.label().to_string(),
                    levels: rubric.descriptors(category).to_vec(),
                })
                .collect(),
        })
    }

    pub fn menu_coverage_view(&self) -> MenuCoverageResult {
        let menu = self.recommender.menu();
        MenuCoverageResult {
            categories: SkillCategory::ALL
                .into_iter()
                .map(|category| MenuCoverageView {
                    category,
                    entries: menu.entries(category).to_vec(),
                    gaps: menu
                        .coverage_gaps(category)
                        .into_iter()
                        .map(Level::get)
                        .collect(),
                })
                .collect(),
        }
    }
}

#[tool_router]
#[prompt_router]
impl AppBaseballMcpHandler {
    pub fn new(client: Arc<dyn AppBaseballClient>) -> Self {
        Self::with_recommender(client, Recommender::default())
    }

    pub fn with_recommender(client: Arc<dyn AppBaseballClient>, recommender: Recommender) -> Self {
        Self {
            client,
            recommender: Arc::new(recommender),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    pub fn tool_count(&self) -> usize {
        self.tool_router.list_all().len()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompt_router.list_all().len()
    }

    #[tool(
        name = "clamp_level",
        description = "Clamp a raw skill level into 1-10 (floored; non-numeric input reads as 10)"
    )]
    async fn clamp_level(
        &self,
        params: Parameters<ClampLevelParams>,
    ) -> Result<Json<ClampLevelResult>, String> {
        Ok(Json(ClampLevelResult {
            level: level_from_json(&params.0.value).get(),
        }))
    }

    #[tool(
        name = "pick_menu",
        description = "Training menu for a skill category at a level"
    )]
    async fn pick_menu(
        &self,
        params: Parameters<CategoryLevelParams>,
    ) -> Result<Json<PickMenuResult>, String> {
        let p = params.0;
        Ok(Json(self.pick_menu_view(&p.category, &p.level)?))
    }

    #[tool(
        name = "select_focus",
        description = "Pick the skill that most needs attention (highest level number) and its menu"
    )]
    async fn select_focus(
        &self,
        params: Parameters<SelectFocusParams>,
    ) -> Result<Json<FocusResult>, String> {
        Ok(Json(self.focus_view(&params.0.levels)))
    }

    #[tool(
        name = "describe_level",
        description = "Rubric description of a level and of the next level toward mastery"
    )]
    async fn describe_level(
        &self,
        params: Parameters<CategoryLevelParams>,
    ) -> Result<Json<DescribeLevelResult>, String> {
        let p = params.0;
        Ok(Json(self.describe_level_view(&p.category, &p.level)?))
    }

    #[tool(
        name = "recommend_for_player",
        description = "Focus skill, level descriptions and training menu from a player's latest evaluation"
    )]
    async fn recommend_for_player(
        &self,
        params: Parameters<PlayerIdParam>,
    ) -> Result<Json<RecommendationResult>, String> {
        Ok(Json(self.recommendation(&params.0.player_id).await?))
    }

    #[tool(name = "get_rubric", description = "Level descriptions for one or all categories")]
    async fn get_rubric(
        &self,
        params: Parameters<OptionalCategoryParam>,
    ) -> Result<Json<RubricResult>, String> {
        Ok(Json(self.rubric_view(params.0.category.as_deref())?))
    }

    #[tool(
        name = "get_menu_coverage",
        description = "Training menus per category and the levels no menu covers"
    )]
    async fn get_menu_coverage(&self) -> Result<Json<MenuCoverageResult>, String> {
        Ok(Json(self.menu_coverage_view()))
    }

    #[tool(name = "list_players", description = "List registered players")]
    async fn list_players(&self) -> Result<Json<PlayersResult>, String> {
        let players = self.client.list_players().await.map_err(McpError::from)?;
        Ok(Json(PlayersResult { players }))
    }

    #[tool(name = "get_player", description = "Get a player by id")]
    async fn get_player(&self, params: Parameters<PlayerIdParam>) -> Result<Json<Player>, String> {
        let player = self
            .client
            .get_player(params.0.player_id.trim())
            .await
            .map_err(McpError::from)?;
        Ok(Json(player))
    }

    #[tool(
        name = "create_evaluation",
        description = "Record a coach evaluation (levels are clamped to 1-10)"
    )]
    async fn create_evaluation(
        &self,
        params: Parameters<CreateEvaluationParams>,
    ) -> Result<Json<EvaluationReceipt>, String> {
        let p = params.0;
        let child_id = to_child_id(&p.player_id).map_err(McpError::from)?;
        let mut evaluation = EvaluationCreate::new(child_id, p.levels)
            .with_memo(p.memo.as_deref().unwrap_or_default());
        let (good, next) = (non_blank(p.good.as_deref()), non_blank(p.next.as_deref()));
        if good.is_some() || next.is_some() {
            evaluation = evaluation.with_comment(Comment::Structured { good, next });
        }
        let receipt = self
            .client
            .create_evaluation(&evaluation)
            .await
            .map_err(McpError::from)?;
        Ok(Json(receipt))
    }

    #[tool(
        name = "list_practice_logs",
        description = "Recent practice logs, newest first, optionally for one player"
    )]
    async fn list_practice_logs(
        &self,
        params: Parameters<ListPracticeLogsParams>,
    ) -> Result<Json<PracticeLogsResult>, String> {
        let p = params.0;
        let child_id = match non_blank(p.player_id.as_deref()) {
            Some(id) => Some(to_child_id(&id).map_err(McpError::from)?),
            None => None,
        };
        let logs = self
            .client
            .list_practice_logs(child_id, p.limit)
            .await
            .map_err(McpError::from)?;
        Ok(Json(PracticeLogsResult { logs }))
    }

    #[tool(name = "create_practice_log", description = "Record a practice log")]
    async fn create_practice_log(
        &self,
        params: Parameters<CreatePracticeLogParams>,
    ) -> Result<Json<PracticeLog>, String> {
        let p = params.0;
        let log = PracticeLogCreate {
            child_id: to_child_id(&p.player_id).map_err(McpError::from)?,
            practice_type: p.practice_type,
            practice_date: practice_date_or_today(p.practice_date.as_deref())?,
            mood: p.mood,
            fatigue: p.fatigue,
            today_practice: p.today_practice,
            coach_said: p.coach_said,
            next_goal: p.next_goal,
            free_note: non_blank(p.free_note.as_deref()),
            content: None,
        };
        let saved = self
            .client
            .create_practice_log(&log)
            .await
            .map_err(McpError::from)?;
        Ok(Json(saved))
    }

    #[tool(
        name = "submit_weekend_journal",
        description = "Save a weekend journal as a team practice log; at least one text field is required"
    )]
    async fn submit_weekend_journal(
        &self,
        params: Parameters<WeekendJournalParams>,
    ) -> Result<Json<PracticeLog>, String> {
        let p = params.0;
        let child_id = to_child_id(&p.player_id).map_err(McpError::from)?;
        let practice_date = practice_date_or_today(p.practice_date.as_deref())?;
        let journal = WeekendJournal {
            did_today: p.did_today,
            coach_said: p.coach_said,
            goal_next: p.goal_next,
            free_note: p.free_note,
            mood: p.mood,
            fatigue: p.fatigue,
        };
        let log = journal
            .into_practice_log(child_id, practice_date)
            .map_err(McpError::from)?;
        let saved = self
            .client
            .create_practice_log(&log)
            .await
            .map_err(McpError::from)?;
        Ok(Json(saved))
    }

    #[tool(
        name = "get_latest_practice_log",
        description = "A player's most recent practice log with its display text (weekend journals: practice_type=team)"
    )]
    async fn get_latest_practice_log(
        &self,
        params: Parameters<LatestPracticeLogParams>,
    ) -> Result<Json<LatestPracticeLogResult>, String> {
        let p = params.0;
        let child_id = to_child_id(&p.player_id).map_err(McpError::from)?;
        let log = self
            .client
            .get_latest_practice_log(child_id, p.practice_type)
            .await
            .map_err(McpError::from)?;
        let text = log.as_ref().map(PracticeLog::display_text);
        Ok(Json(LatestPracticeLogResult { log, text }))
    }

    #[tool(
        name = "get_latest_daily_report",
        description = "A player's most recent daily report"
    )]
    async fn get_latest_daily_report(
        &self,
        params: Parameters<PlayerIdParam>,
    ) -> Result<Json<DailyReportResult>, String> {
        let report = self
            .client
            .get_latest_daily_report(params.0.player_id.trim())
            .await
            .map_err(McpError::from)?;
        Ok(Json(DailyReportResult { report }))
    }

    #[tool(
        name = "submit_daily_report",
        description = "Submit a player's daily report with mood, fatigue and practiced skills"
    )]
    async fn submit_daily_report(
        &self,
        params: Parameters<SubmitDailyReportParams>,
    ) -> Result<Json<DailyReportResult>, String> {
        let p = params.0;
        let practiced = p
            .practiced
            .iter()
            .map(|c| parse_category(c))
            .collect::<McpResult<Vec<_>>>()?;
        let player_id = p.player_id.trim();
        let report = DailyReportCreate::new(player_id, p.body, p.mood, p.fatigue, &practiced);
        let saved = self
            .client
            .create_daily_report(player_id, &report)
            .await
            .map_err(McpError::from)?;
        Ok(Json(DailyReportResult {
            report: Some(saved),
        }))
    }

    #[tool(
        name = "get_coach_summary",
        description = "Total daily reports and the latest report date"
    )]
    async fn get_coach_summary(&self) -> Result<Json<CoachSummary>, String> {
        let summary = self
            .client
            .get_coach_summary()
            .await
            .map_err(McpError::from)?;
        Ok(Json(summary))
    }

    #[tool(
        name = "backend_health",
        description = "Check that the backend and its database are reachable"
    )]
    async fn backend_health(&self) -> Result<Json<BackendHealthResult>, String> {
        let health = self.client.health().await.map_err(McpError::from)?;
        let database_ok = match self.client.ping_database().await {
            Ok(ok) => Some(ok),
            Err(e) => {
                tracing::warn!(error = %e, "database ping failed");
                None
            }
        };
        Ok(Json(BackendHealthResult {
            status: health.status,
            database_ok,
        }))
    }

    // ========================================================================
    // MCP Prompts
    // ========================================================================

    /// Progress review across every skill for one player
    #[prompt(
        name = "player-growth-review",
        description = "Review a player's levels, next steps and recent practice"
    )]
    async fn player_growth_review(
        &self,
        params: Parameters<PlayerGrowthReviewParams>,
    ) -> GetPromptResult {
        prompts::player_growth_review_prompt(params.0.player_id.trim())
    }

    #[prompt(
        name = "weekly-practice-plan",
        description = "Plan a week of home practice around the focus skill"
    )]
    async fn weekly_practice_plan(
        &self,
        params: Parameters<WeeklyPracticePlanParams>,
    ) -> GetPromptResult {
        let p = params.0;
        let days = p.days_per_week.unwrap_or(3).clamp(1, 7);
        // an unrecognized focus falls back to the recommended one
        let focus = non_blank(p.focus.as_deref()).and_then(|c| c.parse::<SkillCategory>().ok());
        prompts::weekly_practice_plan_prompt(p.player_id.trim(), days, focus)
    }
}

#[tool_handler]
#[prompt_handler(router = self.prompt_router)]
impl rmcp::ServerHandler for AppBaseballMcpHandler {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo::new(
            rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
        )
        .with_instructions(
            "Youth baseball skill levels and training recommendations. Levels run from \
             10 (introductory) to 1 (mastery).",
        )
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let mut rubric = RawResource::new(RUBRIC_RESOURCE_URI, "Skill Rubric").no_annotation();
        rubric.description = Some("Level 1-10 descriptions for every skill category".to_string());
        rubric.mime_type = Some("application/json".to_string());

        let mut menu =
            RawResource::new(TRAINING_MENU_RESOURCE_URI, "Training Menus").no_annotation();
        menu.description = Some("Training menus per category with uncovered levels".to_string());
        menu.mime_type = Some("application/json".to_string());

        Ok(ListResourcesResult {
            resources: vec![rubric, menu],
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let text = match request.uri.as_str() {
            RUBRIC_RESOURCE_URI => {
                serde_json::to_string_pretty(&self.recommender.rubric().to_document())
            }
            TRAINING_MENU_RESOURCE_URI => serde_json::to_string_pretty(&self.menu_coverage_view()),
            other => {
                return Err(ErrorData::invalid_params(
                    format!("Unknown resource URI: {}", other),
                    None,
                ));
            }
        }
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;

        Ok(ReadResourceResult::new(vec![
            ResourceContents::TextResourceContents {
                uri: request.uri.clone(),
                mime_type: Some("application/json".to_string()),
                text,
                meta: None,
            },
        ]))
    }
}
