//! Decide which rubric the server runs with.
//!
//! Order: the local file named by `APP_BASEBALL_RUBRIC_PATH`, then the
//! backend's `/rubric`, then the built-in rubric. A local file that fails
//! validation stops startup; a bad or unreachable backend rubric only falls
//! back.

use std::path::PathBuf;

use app_baseball_client::config::Config;
use app_baseball_client::{AppBaseballClient, Rubric};

use crate::McpResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RubricSource {
    File(PathBuf),
    Backend,
    Builtin,
}

impl std::fmt::Display for RubricSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RubricSource::File(path) => write!(f, "file {}", path.display()),
            RubricSource::Backend => f.write_str("backend"),
            RubricSource::Builtin => f.write_str("built-in"),
        }
    }
}

pub async fn resolve_rubric(
    config: &Config,
    client: &dyn AppBaseballClient,
) -> McpResult<(Rubric, RubricSource)> {
    if let Some(path) = &config.rubric_path {
        let rubric = Rubric::load(path)?;
        return Ok((rubric, RubricSource::File(path.clone())));
    }

    match client.get_rubric().await {
        Ok(Some(rubric)) => Ok((rubric, RubricSource::Backend)),
        Ok(None) => {
            tracing::info!("backend has no rubric configured; using built-in rubric");
            Ok((Rubric::builtin().clone(), RubricSource::Builtin))
        }
        Err(e) => {
            tracing::warn!(error = %e, "backend rubric unavailable; using built-in rubric");
            Ok((Rubric::builtin().clone(), RubricSource::Builtin))
        }
    }
}
