use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fmt, fs, path::Path, path::PathBuf};

use crate::error::StageError;

pub const ENV_GEMINI_API_KEY: &str = "GOOGLE_GEMINI_API_KEY";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_OWNER: &str = "OWNER";
pub const ENV_REPOSITORY: &str = "REPOSITORY";

/// Raw configuration, possibly incomplete.
///
/// Example TOML:
/// ```toml
/// gemini_api_key = "..."
/// github_token = "..."
/// owner = "octocat"
/// repository = "lunch"
/// ```
///
/// Environment variables override anything read from the file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub github_token: Option<String>,
    pub owner: Option<String>,
    pub repository: Option<String>,
}

/// Fully validated configuration handed to the HTTP clients.
#[derive(Clone)]
pub struct Settings {
    pub gemini_api_key: String,
    pub github_token: String,
    pub owner: String,
    pub repository: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("gemini_api_key", &"<redacted>")
            .field("github_token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .finish()
    }
}

impl Config {
    /// Load the config file (if any) and apply process environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Read a config file, or return an empty default if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "menu-bot", "menu-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override fields with non-empty values from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let pairs: [(&str, &mut Option<String>); 4] = [
            (ENV_GEMINI_API_KEY, &mut self.gemini_api_key),
            (ENV_GITHUB_TOKEN, &mut self.github_token),
            (ENV_OWNER, &mut self.owner),
            (ENV_REPOSITORY, &mut self.repository),
        ];

        for (key, slot) in pairs {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = Some(value);
            }
        }
    }

    /// Everything needed to file an issue. Reports every missing name at once.
    pub fn validate(&self) -> Result<Settings, StageError> {
        let missing: Vec<&'static str> = [
            (ENV_GEMINI_API_KEY, &self.gemini_api_key),
            (ENV_GITHUB_TOKEN, &self.github_token),
            (ENV_OWNER, &self.owner),
            (ENV_REPOSITORY, &self.repository),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(key, _)| key)
        .collect();

        if !missing.is_empty() {
            return Err(StageError::MissingConfig(missing));
        }

        Ok(Settings {
            gemini_api_key: self.gemini_api_key.clone().unwrap_or_default(),
            github_token: self.github_token.clone().unwrap_or_default(),
            owner: self.owner.clone().unwrap_or_default(),
            repository: self.repository.clone().unwrap_or_default(),
        })
    }

    /// Just the model key, for runs that never touch the issue tracker.
    pub fn gemini_api_key(&self) -> Result<&str, StageError> {
        present(&self.gemini_api_key)
            .ok_or_else(|| StageError::MissingConfig(vec![ENV_GEMINI_API_KEY]))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn validate_reports_all_missing_names() {
        let cfg = Config::default();
        let err = cfg.validate().unwrap_err();

        match err {
            StageError::MissingConfig(names) => assert_eq!(
                names,
                vec![ENV_GEMINI_API_KEY, ENV_GITHUB_TOKEN, ENV_OWNER, ENV_REPOSITORY]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn env_fills_every_field() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[
            (ENV_GEMINI_API_KEY, "gem"),
            (ENV_GITHUB_TOKEN, "ghp"),
            (ENV_OWNER, "octocat"),
            (ENV_REPOSITORY, "lunch"),
        ]));

        let settings = cfg.validate().expect("config must be complete");
        assert_eq!(settings.gemini_api_key, "gem");
        assert_eq!(settings.github_token, "ghp");
        assert_eq!(settings.owner, "octocat");
        assert_eq!(settings.repository, "lunch");
    }

    #[test]
    fn env_overrides_file_but_blank_env_does_not() {
        let mut cfg: Config = toml::from_str(
            r#"
            gemini_api_key = "from-file"
            owner = "file-owner"
            "#,
        )
        .unwrap();

        cfg.apply_env(env(&[(ENV_GEMINI_API_KEY, "from-env"), (ENV_OWNER, "  ")]));

        assert_eq!(cfg.gemini_api_key.as_deref(), Some("from-env"));
        assert_eq!(cfg.owner.as_deref(), Some("file-owner"));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let cfg = Config {
            gemini_api_key: Some("gem".into()),
            github_token: Some(String::new()),
            owner: Some("octocat".into()),
            repository: Some("lunch".into()),
        };

        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains(ENV_GITHUB_TOKEN));
        assert!(!err.to_string().contains(ENV_OWNER));
    }

    #[test]
    fn gemini_key_alone_is_enough_for_generation() {
        let cfg = Config {
            gemini_api_key: Some("gem".into()),
            ..Config::default()
        };
        assert_eq!(cfg.gemini_api_key().unwrap(), "gem");
        assert!(Config::default().gemini_api_key().is_err());
    }

    #[test]
    fn load_from_missing_file_is_empty() {
        let cfg = Config::load_from(Path::new("/nonexistent/menu-bot/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn settings_debug_hides_secrets() {
        let settings = Settings {
            gemini_api_key: "gem-secret".into(),
            github_token: "ghp-secret".into(),
            owner: "octocat".into(),
            repository: "lunch".into(),
        };
        let out = format!("{settings:?}");
        assert!(!out.contains("secret"));
        assert!(out.contains("octocat"));
    }
}
