//! Configuration file support for cardcat.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cardcat/config.toml`.

use crate::catalog::{default_vocabulary, CatalogVocabulary};
use crate::query::{CardQuery, NameMatch};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

/// Where the catalog vocabulary snapshot comes from
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON snapshot exported by the catalog store; built-in vocabulary if unset
    #[serde(default)]
    pub vocabulary_path: Option<PathBuf>,
}

/// Query compilation settings
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct QueryConfig {
    #[serde(default)]
    pub name_match: NameMatch,
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        Ok(base.join("cardcat").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// The configured vocabulary snapshot, or the built-in one.
    ///
    /// A snapshot that fails validation is rejected rather than used.
    pub fn vocabulary(&self) -> Result<Cow<'static, CatalogVocabulary>> {
        let Some(path) = &self.catalog.vocabulary_path else {
            return Ok(Cow::Borrowed(default_vocabulary()));
        };

        let vocabulary = CatalogVocabulary::load_from(path)?;
        let errors = vocabulary.validate();
        if !errors.is_empty() {
            return Err(Error::Config(format!(
                "vocabulary {:?} is invalid: {}",
                path,
                errors.join("; ")
            )));
        }
        Ok(Cow::Owned(vocabulary))
    }

    /// A fresh query builder using the configured name matching.
    pub fn query<'v>(&self, vocabulary: &'v CatalogVocabulary) -> CardQuery<'v> {
        CardQuery::with_vocabulary(vocabulary).with_name_match(self.query.name_match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.catalog.vocabulary_path.is_none());
        assert_eq!(config.query.name_match, NameMatch::Contains);
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("cardcat").join("config.toml");

        let mut config = Config::default();
        config.query.name_match = NameMatch::Prefix;
        config.catalog.vocabulary_path = Some(temp_dir.path().join("vocab.json"));
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.query.name_match, NameMatch::Prefix);
        assert_eq!(parsed.catalog.vocabulary_path, config.catalog.vocabulary_path);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[query]
name_match = "exact"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.query.name_match, NameMatch::Exact);
        assert!(config.catalog.vocabulary_path.is_none());
    }

    #[test]
    fn test_unknown_name_match_is_rejected() {
        let toml_str = r#"
[query]
name_match = "fuzzy"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_vocabulary_defaults_to_builtin() {
        let config = Config::default();
        let vocab = config.vocabulary().unwrap();
        assert!(matches!(vocab, Cow::Borrowed(_)));
        assert_eq!(vocab.set("zen"), Some("ZEN"));
    }

    #[test]
    fn test_vocabulary_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("vocab.json");
        std::fs::write(&path, r#"{"sets": ["ABC"], "artists": ["Jane Doe"]}"#).unwrap();

        let mut config = Config::default();
        config.catalog.vocabulary_path = Some(path.clone());
        let vocab = config.vocabulary().unwrap();
        assert_eq!(vocab.set("abc"), Some("ABC"));
        assert_eq!(vocab.set("zen"), None);

        std::fs::write(&path, r#"{"sets": [" "]}"#).unwrap();
        assert!(matches!(config.vocabulary(), Err(Error::Config(_))));
    }

    #[test]
    fn test_query_uses_name_match() {
        let mut config = Config::default();
        config.query.name_match = NameMatch::Exact;
        let vocab = config.vocabulary().unwrap();

        let mut query = config.query(&vocab);
        query.by_name("Lightning Bolt", true).unwrap();
        assert_eq!(query.as_query(), "name = 'Lightning Bolt'");
    }
}
