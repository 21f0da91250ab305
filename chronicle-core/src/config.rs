//! Immutable run configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.chronicle/
//!   config.yaml   (mode 0600, created by `chronicle init`)
//! ```
//!
//! The API key is deliberately NOT part of the file; it is read from the
//! environment on each run (`CHRONICLE_API_KEY`, falling back to
//! `OPENAI_API_KEY`). Everything else is an explicit field on [`Config`],
//! constructed once and passed down — no module-level mutable state.
//!
//! # API pattern
//!
//! Every filesystem function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{MalformedStrategy, WellFormedStrategy};

/// Environment variables consulted for the API key, in order.
const API_KEY_VARS: &[&str] = &["CHRONICLE_API_KEY", "OPENAI_API_KEY"];

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Run configuration, loaded once per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Chat-completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat-completions endpoint (OpenAI-compatible).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Document to synchronize, relative to the repository root.
    #[serde(default = "default_document")]
    pub document: PathBuf,

    /// Optional webhook for fire-and-forget commit notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Push to `origin` after committing.
    #[serde(default = "default_push")]
    pub push: bool,

    /// Strategy when the document classifies as malformed.
    #[serde(default)]
    pub on_malformed: MalformedStrategy,

    /// Strategy when the document classifies as well-formed.
    #[serde(default)]
    pub on_well_formed: WellFormedStrategy,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_document() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_push() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model: default_model(),
            api_url: default_api_url(),
            document: default_document(),
            webhook_url: None,
            push: default_push(),
            on_malformed: MalformedStrategy::default(),
            on_well_formed: WellFormedStrategy::default(),
        }
    }
}

/// Read the API key from the environment.
pub fn api_key() -> Result<String, ConfigError> {
    for var in API_KEY_VARS {
        if let Ok(value) = std::env::var(var) {
            let value = value.trim().to_string();
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }
    Err(ConfigError::ApiKeyNotFound)
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.chronicle/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".chronicle").join("config.yaml")
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the config from `<home>/.chronicle/config.yaml`.
///
/// Returns `Config::default()` if the file does not exist (first run),
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the config to `<home>/.chronicle/config.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, config: &Config) -> Result<(), ConfigError> {
    let path = config_path_at(home);
    let dir = home.join(".chronicle");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    let tmp = path.with_file_name("config.yaml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp, yaml)?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    save_at(&home()?, config)
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

/// Starter config written by `chronicle init`. Parses back into
/// `Config::default()`.
const STARTER_CONFIG: &str = "\
# Chronicle configuration.
#
# The API key is never stored here; export CHRONICLE_API_KEY
# (or OPENAI_API_KEY) instead.

model: gpt-4o-mini
api_url: https://api.openai.com/v1/chat/completions
document: README.md
push: true

# replace: discard a broken document and draft a fresh one
# repair:  strip leading legacy lines and keep the rest
on_malformed: replace

# insert:     only add the new dated entry
# regenerate: ask the model to revise the whole document first
on_well_formed: insert

# Optional commit notifications:
# webhook_url: https://hooks.slack.com/services/xxx/yyy/zzz
";

/// Scaffold `<home>/.chronicle/config.yaml` with a commented starter file.
///
/// Idempotent: if the file already exists it is left untouched.
/// Returns the path and whether the file was created by this call.
pub fn init_at(home: &Path) -> Result<(PathBuf, bool), ConfigError> {
    let path = config_path_at(home);
    if path.exists() {
        return Ok((path, false));
    }
    let dir = home.join(".chronicle");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    let tmp = path.with_file_name("config.yaml.tmp");
    std::fs::write(&tmp, STARTER_CONFIG)?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, &path)?;
    Ok((path, true))
}

/// `init_at` convenience wrapper.
pub fn init() -> Result<(PathBuf, bool), ConfigError> {
    init_at(&home()?)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_home() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn config_path_is_correct() {
        let home = make_home();
        let path = config_path_at(home.path());
        assert!(path.ends_with(".chronicle/config.yaml"));
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let home = make_home();
        let config = load_at(home.path()).expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let home = make_home();
        let config = Config {
            model: "gpt-4o".to_string(),
            webhook_url: Some("https://hooks.example/abc".to_string()),
            push: false,
            on_malformed: MalformedStrategy::Repair,
            ..Config::default()
        };
        save_at(home.path(), &config).expect("save");
        let loaded = load_at(home.path()).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn save_cleans_up_tmp() {
        let home = make_home();
        save_at(home.path(), &Config::default()).expect("save");
        let tmp = config_path_at(home.path()).with_file_name("config.yaml.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful save");
    }

    #[test]
    fn parse_error_reports_path() {
        let home = make_home();
        let dir = home.path().join(".chronicle");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.yaml"), "model: [unclosed").unwrap();
        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn starter_config_parses_to_defaults() {
        let home = make_home();
        let (path, created) = init_at(home.path()).expect("init");
        assert!(created);
        assert!(path.exists());
        let loaded = load_at(home.path()).expect("load");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn init_is_idempotent() {
        let home = make_home();
        let (_, first) = init_at(home.path()).expect("first init");
        let (_, second) = init_at(home.path()).expect("second init");
        assert!(first);
        assert!(!second, "existing config must be left untouched");
    }

    #[test]
    fn config_dir_created_with_perms() {
        let home = make_home();
        save_at(home.path(), &Config::default()).expect("save");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let dir = home.path().join(".chronicle");
            let mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o700);
        }
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(ConfigError::HomeNotFound.to_string().contains("home directory"));
    }
}
