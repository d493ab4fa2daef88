pub mod init;
mod schema;

pub use init::{write_starter_config, InitError};
pub use schema::{CategoryConfig, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::taxonomy::{builtin_taxonomy, Category, Pillar, Taxonomy, TaxonomyBuilder, TaxonomyError, BUILTIN_TITLE};

/// Get the config directory path (~/.config/esg-score/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("esg-score"))
}

/// Get the default config file path (~/.config/esg-score/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::debug!(
                    "No config at {}, using built-in questionnaire",
                    default_path.display()
                );
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!("Loaded config from {}", config_path.display());

    Ok(config)
}

impl Config {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(BUILTIN_TITLE)
    }

    /// Build the taxonomy this config describes: the custom questionnaire if
    /// one is configured, the built-in one otherwise.
    pub fn taxonomy(&self) -> Result<Taxonomy, TaxonomyError> {
        let Some(categories) = &self.questionnaire else {
            return Ok(builtin_taxonomy());
        };

        let mut builder = TaxonomyBuilder::new();
        for category in categories {
            builder = builder.category(category.category.as_str());
            for pillar in Pillar::ALL {
                for question in category.questions(pillar) {
                    builder = builder.question(pillar, question.as_str());
                }
            }
        }
        builder.build()
    }
}

impl CategoryConfig {
    pub fn questions(&self, pillar: Pillar) -> &[String] {
        match pillar {
            Pillar::Environmental => &self.environmental,
            Pillar::Social => &self.social,
            Pillar::Governance => &self.governance,
        }
    }

    /// Describe an existing taxonomy in config form
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Vec<CategoryConfig> {
        let texts = |category: &Category, pillar: Pillar| -> Vec<String> {
            category
                .questions(pillar)
                .iter()
                .map(|q| q.text().to_string())
                .collect()
        };
        taxonomy
            .categories()
            .iter()
            .map(|category| CategoryConfig {
                category: category.name().to_string(),
                environmental: texts(category, Pillar::Environmental),
                social: texts(category, Pillar::Social),
                governance: texts(category, Pillar::Governance),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config_uses_builtin() {
        let config = Config::default();
        assert_eq!(config.title(), BUILTIN_TITLE);
        assert_eq!(config.taxonomy().unwrap(), builtin_taxonomy());
    }

    #[test]
    fn test_custom_questionnaire() {
        let config = Config {
            title: Some("Custom".to_string()),
            questionnaire: Some(vec![CategoryConfig {
                category: "Claims".to_string(),
                environmental: vec!["Repair?".to_string()],
                social: vec!["Appeals?".to_string()],
                governance: vec![],
            }]),
        };
        let taxonomy = config.taxonomy().unwrap();
        assert_eq!(config.title(), "Custom");
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.categories()[0].questions(Pillar::Social)[0].text(), "Appeals?");
    }

    #[test]
    fn test_custom_questionnaire_duplicates_rejected() {
        let config = Config {
            title: None,
            questionnaire: Some(vec![CategoryConfig {
                category: "Claims".to_string(),
                environmental: vec!["Repair?".to_string()],
                social: vec!["Repair?".to_string()],
                governance: vec![],
            }]),
        };
        assert!(config.taxonomy().is_err());
    }

    #[test]
    fn test_from_taxonomy_roundtrip() {
        let taxonomy = builtin_taxonomy();
        let config = Config {
            title: None,
            questionnaire: Some(CategoryConfig::from_taxonomy(&taxonomy)),
        };
        assert_eq!(config.taxonomy().unwrap(), taxonomy);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = env::temp_dir().join("esg_score_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join("esg_score_test_load_config.yaml");
        fs::write(&path, "title: \"From file\"\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.title(), "From file");
        assert!(config.questionnaire.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let path = env::temp_dir().join("esg_score_test_invalid_config.yaml");
        fs::write(&path, "unknown_key: 1\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }
}
