//! Application configuration
//!
//! Configuration loaded from .talk-topic.toml file, looked up in the
//! working directory first and the home directory second.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".talk-topic.toml";

/// Application configuration loaded from .talk-topic.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Wiki host serving the talk pages
    #[serde(default = "default_wiki_host")]
    pub wiki_host: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Keep expanded replies expanded when a topic is reloaded
    #[serde(default)]
    pub preserve_expand_state: bool,
}

fn default_wiki_host() -> String {
    "en.wikipedia.org".to_string()
}

fn default_user_agent() -> String {
    concat!("talk-topic/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wiki_host: default_wiki_host(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            preserve_expand_state: false,
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        Self::load_from(&Self::search_paths())
    }

    /// Candidate config files, in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE));
        }
        paths
    }

    /// Parse the first readable file of `paths`.
    ///
    /// A file that exists but fails to parse is not skipped over; the
    /// defaults are used instead.
    pub fn load_from<P: AsRef<Path>>(paths: &[P]) -> Self {
        let found = paths.iter().find_map(|path| {
            let path: &Path = path.as_ref();
            std::fs::read_to_string(path)
                .ok()
                .map(|content| (path, content))
        });

        if let Some((path, content)) = found {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}
