use crate::AppBaseballError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    /// Local rubric document that takes precedence over the backend's.
    pub rubric_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rubric_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppBaseballError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, AppBaseballError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = get("APP_BASEBALL_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout_secs = match get("APP_BASEBALL_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppBaseballError::Config(format!(
                        "APP_BASEBALL_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                    )));
                }
            },
        };
        let rubric_path = get("APP_BASEBALL_RUBRIC_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            rubric_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_uses_defaults() {
        let cfg = Config::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert!(cfg.rubric_path.is_none());
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "APP_BASEBALL_BASE_URL" => Some("http://backend:9000".into()),
            "APP_BASEBALL_TIMEOUT_SECS" => Some("3".into()),
            "APP_BASEBALL_RUBRIC_PATH" => Some("/etc/rubric.json".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "http://backend:9000");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.rubric_path, Some(PathBuf::from("/etc/rubric.json")));
    }

    #[test]
    fn from_env_rejects_bad_timeout() {
        for bad in ["0", "-1", "ten"] {
            let res = Config::from_env_with(|k| {
                (k == "APP_BASEBALL_TIMEOUT_SECS").then(|| bad.to_string())
            });
            assert!(matches!(res, Err(AppBaseballError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = Config::from_env_with(|k| match k {
            "APP_BASEBALL_BASE_URL" | "APP_BASEBALL_RUBRIC_PATH" => Some("  ".into()),
            _ => None,
        })
        .expect("cfg");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.rubric_path.is_none());
    }
}
