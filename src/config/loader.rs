//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field.

use super::merge::deep_merge_all;
use super::types::Config;
use crate::format::OutputFormat;
use crate::theming;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the config file looked up in each tier directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config ($CWD/quant-theme/)
    Project = 1,
    /// User-level config (~/.quant-theme/)
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Paths for each configuration tier.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Explicit config file; replaces the project and user tiers when set
    pub explicit_file: Option<PathBuf>,
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        Self::discover_from(process_env)
    }

    /// Discover configuration paths, reading variables through `env`.
    pub fn discover_from(env: impl Fn(&str) -> Option<String>) -> Self {
        let explicit_file = env("QUANT_THEME_CONFIG_PATH").map(PathBuf::from);

        // User dir: QUANT_THEME_USER_DIR or ~/.quant-theme
        let user_dir = env("QUANT_THEME_USER_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".quant-theme")));

        // Project dir: QUANT_THEME_PROJECT_DIR or $CWD/quant-theme
        let project_dir = env("QUANT_THEME_PROJECT_DIR")
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("quant-theme")));

        Self {
            explicit_file,
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            explicit_file: None,
            project_dir,
            user_dir,
        }
    }

    /// Use a single config file instead of the directory tiers.
    pub fn with_explicit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Config files to read, lowest priority first.
    fn tier_files(&self) -> Vec<(ConfigTier, PathBuf)> {
        let mut files = Vec::new();
        if let Some(ref dir) = self.project_dir {
            files.push((ConfigTier::Project, dir.join(CONFIG_FILE_NAME)));
        }
        if let Some(ref dir) = self.user_dir {
            files.push((ConfigTier::User, dir.join(CONFIG_FILE_NAME)));
        }
        files
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: Config,
    /// Config files that contributed, lowest priority first
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers with proper merging.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        Self::load_with_env(paths, process_env)
    }

    /// Load configuration, reading the environment tier through `env`.
    pub fn load_with_env(paths: ConfigPaths, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut configs: Vec<Value> = vec![serde_json::to_value(Config::default())?];
        let mut sources = Vec::new();

        if let Some(ref explicit) = paths.explicit_file {
            // An explicit file must exist; tier files are optional
            let value = read_yaml(explicit)?;
            configs.push(value);
            sources.push(explicit.clone());
        } else {
            for (tier, file) in paths.tier_files() {
                if !file.exists() {
                    continue;
                }
                match read_yaml(&file) {
                    Ok(value) => {
                        debug!(tier = %tier, path = %file.display(), "Loaded config tier");
                        configs.push(value);
                        sources.push(file);
                    }
                    Err(e) => {
                        warn!(tier = %tier, path = %file.display(), error = %e, "Skipping unreadable config");
                    }
                }
            }
        }

        // An empty key in a tier file means "not set", not "clear the default"
        let merged = deep_merge_all(configs.into_iter().map(strip_nulls));
        let mut config: Config =
            serde_json::from_value(merged).context("Invalid configuration")?;

        Self::apply_env_overrides(&mut config, env);

        if !theming::get_themes().contains(&config.theme.as_str()) {
            warn!(
                theme = %config.theme,
                "Configured default theme does not exist; templates without an explicit theme will fail"
            );
        }

        Ok(Self {
            paths,
            config,
            sources,
        })
    }

    /// Apply environment variable overrides to config.
    fn apply_env_overrides(config: &mut Config, env: impl Fn(&str) -> Option<String>) {
        if let Some(theme) = env("QUANT_THEME_THEME") {
            config.theme = theme;
        }

        if let Some(output) = env("QUANT_THEME_OUTPUT") {
            match OutputFormat::parse(&output) {
                Some(format) => config.output = format,
                None => warn!(value = %output, "Ignoring invalid QUANT_THEME_OUTPUT"),
            }
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Config files that were merged, lowest priority first.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Drop null entries from objects, recursively.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}

fn read_yaml(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    // An empty file means "no settings"
    if content.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn write_config(dir: &Path, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_config_paths_discover() {
        let paths = ConfigPaths::discover();
        assert!(paths.project_dir.is_some());
    }

    #[test]
    fn test_discover_defaults_without_env() {
        let paths = ConfigPaths::discover_from(env_of(&[]));
        assert!(paths.explicit_file.is_none());
        assert_eq!(paths.project_dir, Some(PathBuf::from("quant-theme")));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(paths.user_dir, Some(home.join(".quant-theme")));
        }
    }

    #[test]
    fn test_discover_dir_vars_relocate_tiers() {
        let paths = ConfigPaths::discover_from(env_of(&[
            ("QUANT_THEME_CONFIG_PATH", "/etc/qt/config.yaml"),
            ("QUANT_THEME_USER_DIR", "/home/me/qt"),
            ("QUANT_THEME_PROJECT_DIR", "/work/qt"),
        ]));
        assert_eq!(paths.explicit_file, Some(PathBuf::from("/etc/qt/config.yaml")));
        assert_eq!(paths.user_dir, Some(PathBuf::from("/home/me/qt")));
        assert_eq!(paths.project_dir, Some(PathBuf::from("/work/qt")));
    }

    #[test]
    fn test_relocated_user_dir_is_loaded() {
        let temp = TempDir::new().unwrap();
        let user_dir = temp.path().join("elsewhere");
        write_config(&user_dir, "theme: dark\n");

        let user_var = user_dir.to_string_lossy().into_owned();
        let project_var = temp.path().join("no-project").to_string_lossy().into_owned();
        let env = env_of(&[
            ("QUANT_THEME_USER_DIR", user_var.as_str()),
            ("QUANT_THEME_PROJECT_DIR", project_var.as_str()),
        ]);
        let paths = ConfigPaths::discover_from(&env);
        let loader = ConfigLoader::load_with_env(paths, &env).unwrap();
        assert_eq!(loader.config().theme, "dark");
        assert_eq!(loader.sources(), &[user_dir.join(CONFIG_FILE_NAME)]);
    }

    #[test]
    fn test_env_theme_beats_file_theme() {
        let temp = TempDir::new().unwrap();
        let user_dir = temp.path().join("user");
        write_config(&user_dir, "theme: dark\noutput: yaml\n");

        let paths = ConfigPaths::with_dirs(None, Some(user_dir));
        let loader =
            ConfigLoader::load_with_env(paths, env_of(&[("QUANT_THEME_THEME", "light-qm")])).unwrap();
        assert_eq!(loader.config().theme, "light-qm");
        assert_eq!(loader.config().output, OutputFormat::Yaml);
    }

    #[test]
    fn test_env_output_overrides_and_invalid_is_ignored() {
        let temp = TempDir::new().unwrap();
        let user_dir = temp.path().join("user");
        write_config(&user_dir, "output: yaml\n");

        let paths = ConfigPaths::with_dirs(None, Some(user_dir.clone()));
        let loader =
            ConfigLoader::load_with_env(paths, env_of(&[("QUANT_THEME_OUTPUT", "JSON")])).unwrap();
        assert_eq!(loader.config().output, OutputFormat::Json);

        let paths = ConfigPaths::with_dirs(None, Some(user_dir));
        let loader =
            ConfigLoader::load_with_env(paths, env_of(&[("QUANT_THEME_OUTPUT", "xml")])).unwrap();
        assert_eq!(loader.config().output, OutputFormat::Yaml);
    }

    #[test]
    fn test_empty_key_keeps_default() {
        let temp = TempDir::new().unwrap();
        let user_dir = temp.path().join("user");
        write_config(&user_dir, "theme:\noutput: yaml\n");

        let paths = ConfigPaths::with_dirs(None, Some(user_dir));
        let loader = ConfigLoader::load_with_env(paths, env_of(&[])).unwrap();
        assert_eq!(loader.config().theme, "light");
        assert_eq!(loader.config().output, OutputFormat::Yaml);
    }

    #[test]
    fn test_empty_key_does_not_clear_lower_tier() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        let user_dir = temp.path().join("user");
        write_config(&project_dir, "theme: dark\n");
        write_config(&user_dir, "theme: ~\n");

        let paths = ConfigPaths::with_dirs(Some(project_dir), Some(user_dir));
        let loader = ConfigLoader::load_with_env(paths, env_of(&[])).unwrap();
        assert_eq!(loader.config().theme, "dark");
    }

    #[test]
    fn test_tier_order() {
        assert!(ConfigTier::Defaults < ConfigTier::Project);
        assert!(ConfigTier::Project < ConfigTier::User);
        assert!(ConfigTier::User < ConfigTier::Environment);
        assert_eq!(ConfigTier::User.to_string(), "user");
    }

    #[test]
    fn test_load_defaults_only() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_dirs(
            Some(temp.path().join("project")),
            Some(temp.path().join("user")),
        );

        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config().theme, "light");
        assert!(loader.sources().is_empty());
    }

    #[test]
    fn test_empty_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("quant-theme");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(project_dir.join(CONFIG_FILE_NAME), "").unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), None);
        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config().theme, "light");
        assert_eq!(loader.sources().len(), 1);
    }

    #[test]
    fn test_malformed_tier_is_skipped() {
        let temp = TempDir::new().unwrap();
        let user_dir = temp.path().join("user");
        std::fs::create_dir_all(&user_dir).unwrap();
        std::fs::write(user_dir.join(CONFIG_FILE_NAME), "theme: [unclosed\n").unwrap();

        let paths = ConfigPaths::with_dirs(None, Some(user_dir));
        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config().theme, "light");
        assert!(loader.sources().is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_dirs(None, None)
            .with_explicit_file(temp.path().join("nope.yaml"));
        assert!(ConfigLoader::load_with_paths(paths).is_err());
    }
}
