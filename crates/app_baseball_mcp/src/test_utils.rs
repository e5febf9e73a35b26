//! Mock `AppBaseballClient` shared by unit tests.
#![cfg(test)]

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use app_baseball_client::{
    AppBaseballClient, AppBaseballError, CoachSummary, DailyReport, DailyReportCreate,
    EvaluationCreate, EvaluationReceipt, EvaluationSnapshot, HealthStatus, Player, PracticeLog,
    PracticeLogCreate, PracticeType, Rubric,
};

/// Answers from fixed data and records what was created.
#[derive(Default)]
pub struct MockClient {
    evaluations: HashMap<String, serde_json::Value>,
    pub created_logs: Mutex<Vec<PracticeLogCreate>>,
}

impl MockClient {
    pub fn with_evaluation(player_id: &str, record: serde_json::Value) -> Self {
        let mut evaluations = HashMap::new();
        evaluations.insert(player_id.to_string(), record);
        Self {
            evaluations,
            ..Default::default()
        }
    }
}

#[async_trait]
impl AppBaseballClient for MockClient {
    async fn health(&self) -> Result<HealthStatus, AppBaseballError> {
        Ok(HealthStatus {
            status: "ok".into(),
        })
    }

    async fn ping_database(&self) -> Result<bool, AppBaseballError> {
        Ok(true)
    }

    async fn get_rubric(&self) -> Result<Option<Rubric>, AppBaseballError> {
        Ok(None)
    }

    async fn list_players(&self) -> Result<Vec<Player>, AppBaseballError> {
        Ok(vec![Player {
            id: "1".into(),
            name: "Test Player".into(),
            grade: Some("4".into()),
            tags: vec![],
        }])
    }

    async fn get_player(&self, player_id: &str) -> Result<Player, AppBaseballError> {
        if player_id == "1" {
            Ok(Player {
                id: "1".into(),
                name: "Test Player".into(),
                grade: None,
                tags: vec![],
            })
        } else {
            Err(AppBaseballError::NotFound("player not found".into()))
        }
    }

    async fn get_latest_evaluation(
        &self,
        player_id: &str,
    ) -> Result<Option<EvaluationSnapshot>, AppBaseballError> {
        self.evaluations
            .get(player_id)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(AppBaseballError::from)
    }

    async fn create_evaluation(
        &self,
        evaluation: &EvaluationCreate,
    ) -> Result<EvaluationReceipt, AppBaseballError> {
        evaluation.validate()?;
        Ok(EvaluationReceipt {
            status: "ok".into(),
            reason: None,
        })
    }

    async fn list_practice_logs(
        &self,
        _child_id: Option<u32>,
        _limit: Option<u32>,
    ) -> Result<Vec<PracticeLog>, AppBaseballError> {
        Ok(vec![])
    }

    async fn create_practice_log(
        &self,
        log: &PracticeLogCreate,
    ) -> Result<PracticeLog, AppBaseballError> {
        log.validate()?;
        let mut created = self.created_logs.lock().await;
        created.push(log.clone());
        Ok(PracticeLog {
            id: created.len() as i64,
            child_id: i64::from(log.child_id),
            practice_type: log.practice_type,
            practice_date: log.practice_date,
            mood: log.mood,
            fatigue: log.fatigue,
            today_practice: log.today_practice.clone(),
            coach_said: log.coach_said.clone(),
            next_goal: log.next_goal.clone(),
            free_note: log.free_note.clone(),
            content: log.content.clone(),
            created_at: log.practice_date.and_hms_opt(12, 0, 0).unwrap_or_default(),
        })
    }

    async fn get_latest_practice_log(
        &self,
        child_id: u32,
        practice_type: Option<PracticeType>,
    ) -> Result<Option<PracticeLog>, AppBaseballError> {
        let created = self.created_logs.lock().await;
        Ok(created
            .iter()
            .enumerate()
            .rev()
            .find(|(_, log)| {
                log.child_id == child_id
                    && practice_type.is_none_or(|t| t == log.practice_type)
            })
            .map(|(i, log)| PracticeLog {
                id: i as i64 + 1,
                child_id: i64::from(log.child_id),
                practice_type: log.practice_type,
                practice_date: log.practice_date,
                mood: log.mood,
                fatigue: log.fatigue,
                today_practice: log.today_practice.clone(),
                coach_said: log.coach_said.clone(),
                next_goal: log.next_goal.clone(),
                free_note: log.free_note.clone(),
                content: log.content.clone(),
                created_at: log.practice_date.and_hms_opt(12, 0, 0).unwrap_or_default(),
            }))
    }

    async fn get_latest_daily_report(
        &self,
        _player_id: &str,
    ) -> Result<Option<DailyReport>, AppBaseballError> {
        Ok(None)
    }

    async fn create_daily_report(
        &self,
        player_id: &str,
        report: &DailyReportCreate,
    ) -> Result<DailyReport, AppBaseballError> {
        report.validate()?;
        Ok(DailyReport {
            id: Some("1".into()),
            player_id: Some(player_id.to_string()),
            created_at: None,
            body: report.body.clone(),
            mood: Some(report.mood),
            fatigue: Some(report.fatigue),
            tags: report.tags.clone(),
        })
    }

    async fn get_coach_summary(&self) -> Result<CoachSummary, AppBaseballError> {
        Ok(CoachSummary::default())
    }
}
