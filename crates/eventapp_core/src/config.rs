use anyhow::{bail, Context};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Everything in process; data is lost on exit.
    Memory,
    Firebase { api_key: String, project_id: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend: Backend,
    pub poll_interval: Duration,
    pub storage_path: PathBuf,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            poll_interval: Duration::from_millis(1000),
            storage_path: default_storage_path(),
            log_level: log::LevelFilter::Info,
        }
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eventapp")
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let backend = match get("EVENTAPP_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => Backend::Memory,
            Some("firebase") => Backend::Firebase {
                api_key: get("FIREBASE_API_KEY")
                    .filter(|v| !v.trim().is_empty())
                    .context("FIREBASE_API_KEY is required for the firebase backend")?,
                project_id: get("FIREBASE_PROJECT_ID")
                    .filter(|v| !v.trim().is_empty())
                    .context("FIREBASE_PROJECT_ID is required for the firebase backend")?,
            },
            Some(other) => {
                bail!("unknown EVENTAPP_BACKEND {:?} (expected memory or firebase)", other)
            }
        };
        let poll_interval = match get("EVENTAPP_POLL_INTERVAL_MS") {
            Some(v) => Duration::from_millis(
                v.trim()
                    .parse()
                    .with_context(|| {
                        format!("EVENTAPP_POLL_INTERVAL_MS is not a number: {:?}", v)
                    })?,
            ),
            None => Duration::from_millis(1000),
        };
        let storage_path = get("EVENTAPP_STORAGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_path);
        let log_level = match get("EVENTAPP_LOG") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("EVENTAPP_LOG is not a log level: {:?}", v))?,
            None => log::LevelFilter::Info,
        };
        Ok(Self {
            backend,
            poll_interval,
            storage_path,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_memory_backend() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.backend, Backend::Memory);
        assert_eq!(cfg.poll_interval, Duration::from_millis(1000));
        assert_eq!(cfg.log_level, log::LevelFilter::Info);
        assert!(cfg.storage_path.ends_with("eventapp"));
    }

    #[test]
    fn firebase_requires_credentials() {
        let err = AppConfig::from_lookup(lookup(&[("EVENTAPP_BACKEND", "firebase")])).unwrap_err();
        assert!(err.to_string().contains("FIREBASE_API_KEY"));
        let cfg = AppConfig::from_lookup(lookup(&[
            ("EVENTAPP_BACKEND", "firebase"),
            ("FIREBASE_API_KEY", "key"),
            ("FIREBASE_PROJECT_ID", "demo"),
            ("EVENTAPP_POLL_INTERVAL_MS", "250"),
            ("EVENTAPP_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.backend,
            Backend::Firebase {
                api_key: "key".into(),
                project_id: "demo".into()
            }
        );
        assert_eq!(cfg.poll_interval, Duration::from_millis(250));
        assert_eq!(cfg.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn rejects_unknown_backend_and_bad_numbers() {
        assert!(AppConfig::from_lookup(lookup(&[("EVENTAPP_BACKEND", "sqlite")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("EVENTAPP_POLL_INTERVAL_MS", "soon")])).is_err());
    }
}
