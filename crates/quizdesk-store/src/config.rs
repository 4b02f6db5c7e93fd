//! Store configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdesk_core::service::ServiceConfig;
use quizdesk_core::traits::QuizStore;

use crate::json::JsonFileStore;
use crate::memory::MemoryStore;

/// Which backend holds quizzes, users and submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process memory. Nothing survives a restart.
    Memory,
    /// A single JSON document on disk.
    Json {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./quizdesk-data/store.json")
}

/// Top-level quizdesk configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeskConfig {
    /// Storage backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Page size for listings that don't ask for one. When unset, the
    /// smaller of 100 and `max_page_limit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_page_limit: Option<usize>,
    /// Largest page size a listing may ask for.
    #[serde(default = "default_page_limit")]
    pub max_page_limit: usize,
}

fn default_page_limit() -> usize {
    100
}

impl Default for QuizdeskConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            default_page_limit: None,
            max_page_limit: default_page_limit(),
        }
    }
}

impl QuizdeskConfig {
    /// Page size used when a listing doesn't ask for one.
    pub fn page_limit(&self) -> usize {
        self.default_page_limit
            .unwrap_or_else(|| default_page_limit().min(self.max_page_limit))
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            default_page_limit: self.page_limit(),
            max_page_limit: self.max_page_limit,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
        search_from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdesk.toml` in the current directory
/// 2. `~/.config/quizdesk/config.toml`
///
/// `QUIZDESK_STORE_PATH` overrides the store location and selects the
/// JSON backend.
pub fn load_config() -> Result<QuizdeskConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeskConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizdesk.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizdeskConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizdeskConfig::default(),
    };

    if let Ok(store_path) = std::env::var("QUIZDESK_STORE_PATH") {
        config.store = StoreConfig::Json {
            path: PathBuf::from(store_path),
        };
    }

    if let StoreConfig::Json { path } = &mut config.store {
        *path = PathBuf::from(resolve_env_vars(&path.to_string_lossy()));
    }

    if config.max_page_limit == 0 {
        anyhow::bail!("max_page_limit must be at least 1");
    }
    if let Some(limit) = config.default_page_limit {
        if limit == 0 || limit > config.max_page_limit {
            anyhow::bail!(
                "default_page_limit must be between 1 and max_page_limit ({}), got {limit}",
                config.max_page_limit
            );
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdesk"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn QuizStore>> {
    match config {
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreConfig::Json { path } => {
            let store = JsonFileStore::open(path)
                .with_context(|| format!("failed to open store: {}", path.display()))?;
            Ok(Arc::new(store))
        }
    }
}
