//! Configuration loading for swap rules
//!
//! Rules are loaded from TOML files in two locations:
//! - **Builtin**: Shipped next to the plugin (read-only)
//! - **Custom**: User-created rules (editable)
//!
//! Files are read in sorted path order so rule order, and therefore
//! reconciliation order, is the same on every load.

use std::fs;
use std::path::{Path, PathBuf};

use super::definitions::RuleConfig;
use super::store::{RuleStore, SwapRuleSet};

/// Errors that can occur during config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load rules from builtin and custom directories
///
/// Builtin rules are loaded first, then custom rules. Custom rules with the
/// same ID replace builtins. A missing directory is not an error.
pub fn load_rules(
    builtin_dir: Option<&Path>,
    custom_dir: Option<&Path>,
) -> Result<SwapRuleSet, ConfigError> {
    let mut set = SwapRuleSet::new();

    if let Some(dir) = builtin_dir {
        if dir.exists() {
            load_directory(&mut set, dir, "builtin")?;
        }
    }

    if let Some(dir) = custom_dir {
        if dir.exists() {
            load_directory(&mut set, dir, "custom")?;
        }
    }

    tracing::debug!(
        rules = set.len(),
        abilities = set.all_abilities().len(),
        "Loaded swap rules"
    );
    Ok(set)
}

/// Load all TOML files from a directory
fn load_directory(set: &mut SwapRuleSet, dir: &Path, source: &str) -> Result<(), ConfigError> {
    let entries = fs::read_dir(dir).map_err(|e| ConfigError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        match load_file(&path) {
            Ok(config) => {
                let duplicates = set.add_config(config, true);
                if !duplicates.is_empty() {
                    tracing::warn!(
                        source,
                        file = ?path.file_name(),
                        ?duplicates,
                        "Duplicate swap rule IDs"
                    );
                }
            }
            Err(e) => {
                // Keep loading the remaining files
                tracing::warn!(source, file = ?path.file_name(), error = %e, "Failed to load rule file");
            }
        }
    }

    Ok(())
}

/// Load a single TOML rule file
pub fn load_file(path: &Path) -> Result<RuleConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Get the default builtin rules directory
pub fn default_builtin_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("lumen").join("rules")))
}

/// Get the default custom rules directory
pub fn default_custom_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lumen").join("rules"))
}
