use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;

use app_baseball_client::{
    AppBaseballClient, AppBaseballError, CoachSummary, DailyReport, DailyReportCreate,
    EvaluationCreate, EvaluationReceipt, EvaluationSnapshot, HealthStatus, Player, PracticeLog,
    PracticeLogCreate, PracticeType, Rubric,
};
use app_baseball_mcp::AppBaseballMcpHandler;
use app_baseball_mcp::http::{AppState, router};

struct LocalMockClient;

#[async_trait::async_trait]
impl AppBaseballClient for LocalMockClient {
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
        Ok(vec![])
    }
    async fn get_player(&self, player_id: &str) -> Result<Player, AppBaseballError> {
        Err(AppBaseballError::NotFound(format!("player {player_id}")))
    }
    async fn get_latest_evaluation(
        &self,
        player_id: &str,
    ) -> Result<Option<EvaluationSnapshot>, AppBaseballError> {
        match player_id {
            "1" => {
                let record = serde_json::json!({
                    "id": 3,
                    "child_id": 1,
                    "values": { "batting": 4, "throwing": 9, "catching": 10, "running": 6, "iq": 5 },
                    "memo": "よく振れている",
                    "created_at": "2024-06-02 18:00:00"
                });
                Ok(Some(serde_json::from_value(record)?))
            }
            "2" => Ok(None),
            _ => Err(AppBaseballError::NotFound(format!("player {player_id}"))),
        }
    }
    async fn create_evaluation(
        &self,
        _evaluation: &EvaluationCreate,
    ) -> Result<EvaluationReceipt, AppBaseballError> {
        unimplemented!()
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
        _log: &PracticeLogCreate,
    ) -> Result<PracticeLog, AppBaseballError> {
        unimplemented!()
    }
    async fn get_latest_practice_log(
        &self,
        _child_id: u32,
        _practice_type: Option<PracticeType>,
    ) -> Result<Option<PracticeLog>, AppBaseballError> {
        Ok(None)
    }
    async fn get_latest_daily_report(
        &self,
        _player_id: &str,
    ) -> Result<Option<DailyReport>, AppBaseballError> {
        Ok(None)
    }
    async fn create_daily_report(
        &self,
        _player_id: &str,
        _report: &DailyReportCreate,
    ) -> Result<DailyReport, AppBaseballError> {
        unimplemented!()
    }
    async fn get_coach_summary(&self) -> Result<CoachSummary, AppBaseballError> {
        Ok(CoachSummary::default())
    }
}

async fn spawn_app() -> SocketAddr {
    let handler = AppBaseballMcpHandler::new(Arc::new(LocalMockClient));
    let metrics = metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle();
    let app = router(Arc::new(AppState { handler, metrics }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::serve(listener, app.into_make_service());
    let _sv = tokio::spawn(async move {
        server.await.ok();
    });
    addr
}

#[tokio::test]
async fn health_and_metrics_respond() {
    let addr = spawn_app().await;
    let http = Client::new();

    let res = http
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    let res = http
        .get(format!("http://{}/metrics", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let ct = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(ct.starts_with("text/plain"));
}

#[tokio::test]
async fn level_and_menu_routes() {
    let addr = spawn_app().await;
    let http = Client::new();

    let v: serde_json::Value = http
        .get(format!("http://{}/levels/batting/7", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["category"], "batting");
    assert_eq!(v["current"]["level"], 7);
    assert_eq!(v["next"]["level"], 6);

    // legacy alias and fractional level floor to 7
    let v: serde_json::Value = http
        .get(format!("http://{}/menus/hitting/7.9", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["category"], "batting");
    assert_eq!(v["level"], 7);
    assert_eq!(v["menu"]["title"], "フルスイング・ミート");

    let res = http
        .get(format!("http://{}/menus/swimming/3", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn focus_route_picks_highest_level() {
    let addr = spawn_app().await;
    let http = Client::new();

    let body = serde_json::json!({
        "levels": { "batting": 10, "throwing": 3, "catching": 3, "running": 3, "iq": 3 }
    });
    let v: serde_json::Value = http
        .post(format!("http://{}/focus", addr))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["category"], "batting");
    assert_eq!(v["level"], 10);
    assert_eq!(v["menu"]["title"], "スイングの土台作り");
}

#[tokio::test]
async fn player_recommendation_routes() {
    let addr = spawn_app().await;
    let http = Client::new();

    let v: serde_json::Value = http
        .get(format!("http://{}/players/1/recommendation", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["has_evaluation"], true);
    assert_eq!(v["focus"]["category"], "catching");
    assert_eq!(v["evaluated_at"], "2024-06-02T18:00:00");
    assert_eq!(v["comment"], "よく振れている");

    let v: serde_json::Value = http
        .get(format!("http://{}/players/2/recommendation", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["has_evaluation"], false);
    // every category reads as 10, so the first in order wins
    assert_eq!(v["focus"]["category"], "batting");
    assert_eq!(v["focus"]["level"], 10);

    let res = http
        .get(format!("http://{}/players/99/recommendation", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}
