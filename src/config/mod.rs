//! Client configuration: TOML on disk, defaults for everything.

pub mod schema;

pub use schema::{
    ApiConfig, Config, GatingMode, ReportConfig, SearchConfig, StorageConfig, ViewerConfig,
    WizardConfig,
};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("kr", "jeonsafe", "jeonsafe")
}

/// Default location of `config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Expand `~` and `$VAR`/`${VAR}` references in a configured path.
/// A reference to an unset variable leaves the variables unexpanded.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!(path = raw, "cannot expand path: {e}");
            PathBuf::from(shellexpand::tilde(raw).as_ref())
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Config("api.base_url must not be empty".into()));
        }
        if !(self.viewer.page_width > 0.0) {
            return Err(Error::Config("viewer.page_width must be positive".into()));
        }
        Ok(())
    }

    /// Directory of the local state database.
    pub fn state_dir(&self) -> PathBuf {
        if !self.storage.state_dir.is_empty() {
            return expand_path(&self.storage.state_dir);
        }
        project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".jeonsafe"))
    }

    pub fn download_dir(&self) -> PathBuf {
        expand_path(&self.report.download_dir)
    }

    /// JSON Schema of the config file, pretty-printed.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.search.law_k, 5);
        assert!((config.search.law_min_score - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.viewer.page_width, 668.0);
        assert_eq!(config.wizard.gating, GatingMode::Strict);
        assert_eq!(config.report.font, "HYGoThic-Medium");
    }

    #[test]
    fn partial_sections_override() {
        let config = Config::from_toml(
            r#"
            [api]
            base_url = "https://jeonsafe.example"
            timeout_secs = 30

            [wizard]
            gating = "next"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://jeonsafe.example");
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.wizard.gating, GatingMode::Next);
        assert_eq!(config.search.case_k, 5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_toml("[api]\nbase_url = \"\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("[viewer]\npage_width = 0.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::from_toml("api = 3"), Err(Error::Config(_))));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.search.case_k, 5);
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = Config::json_schema().unwrap();
        assert!(schema.contains("base_url"));
        assert!(schema.contains("gating"));
    }

    #[test]
    fn paths_expand_home_and_variables() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(expand_path("$HOME/reports"), Path::new(&home).join("reports"));
            assert_eq!(expand_path("${HOME}/reports"), Path::new(&home).join("reports"));
            assert_eq!(expand_path("~/reports"), Path::new(&home).join("reports"));
        }
        assert_eq!(
            expand_path("/tmp/$JEONSAFE_UNSET_FOR_TEST/x"),
            PathBuf::from("/tmp/$JEONSAFE_UNSET_FOR_TEST/x")
        );
    }
}
