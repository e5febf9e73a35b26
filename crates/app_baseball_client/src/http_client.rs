//! HTTP client implementation for the app_baseball backend.
//!
//! This module provides a reqwest-based implementation of the
//! [`AppBaseballClient`](crate::AppBaseballClient) trait. Every call is a
//! single attempt; failures are mapped onto [`AppBaseballError`] and left to
//! the caller.

use crate::config::Config;
use crate::evaluation::{EvaluationCreate, EvaluationReceipt, EvaluationSnapshot};
use crate::practice::{
    CoachSummary, DailyReport, DailyReportCreate, Player, PracticeLog, PracticeLogCreate,
    PracticeType,
};
use crate::rubric::{Rubric, RubricDocument, RubricError};
use crate::utils::unwrap_envelope;
use crate::{AppBaseballClient, AppBaseballError, HealthStatus};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_LOG_LIMIT: u32 = 50;
pub const MAX_LOG_LIMIT: u32 = 200;

/// Client for the app_baseball REST API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestAppBaseballClient {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestAppBaseballClient {
    /// Create a client with the default request timeout.
    ///
    /// # Arguments
    /// * `base_url` - Root of the backend, e.g. "http://localhost:8000"
    pub fn new(base_url: &str) -> Result<Self, AppBaseballError> {
        Self::with_timeout(base_url, Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, AppBaseballError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppBaseballError> {
        Self::with_timeout(&config.base_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_request(&self, endpoint: &'static str, path: &str) -> reqwest::RequestBuilder {
        record_request(endpoint);
        self.client.get(self.url(path))
    }

    fn post_request(&self, endpoint: &'static str, path: &str) -> reqwest::RequestBuilder {
        record_request(endpoint);
        self.client.post(self.url(path))
    }

    /// Execute a request and decode the JSON body, which may be `null`.
    async fn execute_value(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, AppBaseballError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a request and expect a JSON response, optionally wrapped in
    /// `{envelope: ...}`.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        envelope: Option<&str>,
    ) -> Result<T, AppBaseballError> {
        let mut value = self.execute_value(request).await?;
        if let Some(key) = envelope {
            value = unwrap_envelope(value, key);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Like [`Self::execute_json`], but a 404 or `null` body means "none".
    async fn execute_optional<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        envelope: &str,
    ) -> Result<Option<T>, AppBaseballError> {
        let value = match self.execute_value(request).await {
            Ok(value) => unwrap_envelope(value, envelope),
            Err(AppBaseballError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> AppBaseballError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        tracing::debug!(status, body = %body_snippet, "backend request failed");

        match status {
            404 => AppBaseballError::NotFound(body_snippet),
            422 => AppBaseballError::InvalidInput(body_snippet),
            _ => AppBaseballError::Api {
                status,
                body: body_snippet,
            },
        }
    }
}

fn record_request(endpoint: &'static str) {
    tracing::debug!(endpoint, "backend request");
    metrics::counter!("app_baseball_client_requests_total", "endpoint" => endpoint).increment(1);
}

fn rubric_from_value(value: serde_json::Value) -> Result<Option<Rubric>, AppBaseballError> {
    let value = unwrap_envelope(value, "rubric");
    if value.is_null() {
        return Ok(None);
    }
    let document: RubricDocument = serde_json::from_value(value).map_err(RubricError::Parse)?;
    if document.is_empty() {
        return Ok(None);
    }
    Ok(Some(Rubric::from_document(document)?))
}

#[async_trait]
impl AppBaseballClient for ReqwestAppBaseballClient {
    async fn health(&self) -> Result<HealthStatus, AppBaseballError> {
        self.execute_json(self.get_request("health", "/health"), None)
            .await
    }

    async fn ping_database(&self) -> Result<bool, AppBaseballError> {
        let value = self
            .execute_value(self.get_request("db_ping", "/db/ping"))
            .await?;
        Ok(value.get("db").and_then(|v| v.as_str()) == Some("ok"))
    }

    async fn get_rubric(&self) -> Result<Option<Rubric>, AppBaseballError> {
        let value = self
            .execute_value(self.get_request("rubric", "/rubric"))
            .await?;
        rubric_from_value(value)
    }

    async fn list_players(&self) -> Result<Vec<Player>, AppBaseballError> {
        self.execute_json(self.get_request("players", "/players"), Some("players"))
            .await
    }

    async fn get_player(&self, player_id: &str) -> Result<Player, AppBaseballError> {
        let path = format!("/players/{}", player_id.trim());
        self.execute_json(self.get_request("player", &path), Some("player"))
            .await
    }

    async fn get_latest_evaluation(
        &self,
        player_id: &str,
    ) -> Result<Option<EvaluationSnapshot>, AppBaseballError> {
        let path = format!("/players/{}/evaluations/latest", player_id.trim());
        self.execute_optional(self.get_request("latest_evaluation", &path), "evaluation")
            .await
    }

    async fn create_evaluation(
        &self,
        evaluation: &EvaluationCreate,
    ) -> Result<EvaluationReceipt, AppBaseballError> {
        evaluation.validate()?;
        let primary = self
            .execute_json(
                self.post_request("create_evaluation", "/evaluations")
                    .json(evaluation),
                None,
            )
            .await;
        match primary {
            // Older deployments only accept the per-player route.
            Err(
                e @ (AppBaseballError::NotFound(_)
                | AppBaseballError::InvalidInput(_)
                | AppBaseballError::Api { .. }),
            ) => {
                tracing::debug!(error = %e, "POST /evaluations rejected; trying per-player route");
                let path = format!("/players/{}/evaluations", evaluation.child_id);
                self.execute_json(
                    self.post_request("create_player_evaluation", &path)
                        .json(evaluation),
                    None,
                )
                .await
            }
            other => other,
        }
    }

    async fn list_practice_logs(
        &self,
        child_id: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<PracticeLog>, AppBaseballError> {
        let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT);
        let mut pairs: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(child_id) = child_id {
            pairs.push(("child_id", child_id.to_string()));
        }
        let qp: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();

        self.execute_json(
            self.get_request("practice_logs", "/practice-logs").query(&qp),
            None,
        )
        .await
    }

    async fn create_practice_log(
        &self,
        log: &PracticeLogCreate,
    ) -> Result<PracticeLog, AppBaseballError> {
        log.validate()?;
        self.execute_json(
            self.post_request("create_practice_log", "/practice-logs")
                .json(log),
            None,
        )
        .await
    }

    async fn get_latest_practice_log(
        &self,
        child_id: u32,
        practice_type: Option<PracticeType>,
    ) -> Result<Option<PracticeLog>, AppBaseballError> {
        let mut qp: Vec<(&str, &str)> = Vec::new();
        let child_id = child_id.to_string();
        qp.push(("child_id", child_id.as_str()));
        if let Some(practice_type) = practice_type {
            qp.push(("practice_type", practice_type.as_str()));
        }
        self.execute_optional(
            self.get_request("latest_practice_log", "/practice-logs/latest")
                .query(&qp),
            "log",
        )
        .await
    }

    async fn get_latest_daily_report(
        &self,
        player_id: &str,
    ) -> Result<Option<DailyReport>, AppBaseballError> {
        let path = format!("/players/{}/daily-reports/latest", player_id.trim());
        self.execute_optional(self.get_request("latest_daily_report", &path), "report")
            .await
    }

    async fn create_daily_report(
        &self,
        player_id: &str,
        report: &DailyReportCreate,
    ) -> Result<DailyReport, AppBaseballError> {
        report.validate()?;
        let path = format!("/players/{}/daily-reports", player_id.trim());
        self.execute_json(
            self.post_request("create_daily_report", &path).json(report),
            Some("report"),
        )
        .await
    }

    async fn get_coach_summary(&self) -> Result<CoachSummary, AppBaseballError> {
        self.execute_json(
            self.get_request("coach_summary", "/coach/summary"),
            Some("summary"),
        )
        .await
    }
}
