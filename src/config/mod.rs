mod settings;
mod state;

pub use settings::{Config, DisplaySettings, SourceSettings};
pub use state::State;

use crate::error::{PayableError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, or ~/.payable/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "payable") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        PayableError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".payable"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured path; relative paths are taken from the config directory
pub fn resolve_path(path: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(path);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

/// Load config.toml (defaults if missing)
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config.toml, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PayableError::ConfigParse { path, source: e })
}

/// Load state.toml (defaults if missing)
pub fn load_state(cfg_dir: &Path) -> Result<State> {
    let path = cfg_dir.join("state.toml");
    if !path.exists() {
        return Ok(State::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PayableError::ConfigParse { path, source: e })
}

/// Save state.toml, creating the config directory if needed
pub fn save_state(cfg_dir: &Path, state: &State) -> Result<()> {
    let path = cfg_dir.join("state.toml");
    let content = toml::to_string_pretty(state).map_err(|e| PayableError::ConfigWrite {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    fs::create_dir_all(cfg_dir)?;
    fs::write(path, content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[source]
# REST API serving /consumptions, /payments and /paymentBreakdowns.
# PAYABLE_API_BASE_URL overrides this value.
base_url = "http://localhost:4000"
# Read a local db.json instead of the API (relative to this directory)
# db_path = "db.json"
timeout_secs = 10

[display]
currency_symbol = "$"
# "first-seen" keeps sales orders in data order, "style" sorts by style number
sort = "first-seen"
"#;
