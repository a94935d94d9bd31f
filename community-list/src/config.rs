use std::path::Path;

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_TOP_LEVEL_PAGE_SIZE: usize = 5;

/// Failed to load an [`AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file couldn't be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config wasn't valid json, or was missing keys.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// `homePage.topLevelCommunityList.pageSize` was 0.
    #[error("homePage.topLevelCommunityList.pageSize must be at least 1")]
    InvalidPageSize,
}

/// The process-wide application configuration, as far as the home page needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Home page settings.
    pub home_page: HomePageConfig,
}

/// Settings for the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageConfig {
    /// Settings for the list of top-level communities.
    pub top_level_community_list: TopLevelCommunityListConfig,
}

/// Settings for the list of top-level communities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLevelCommunityListConfig {
    /// Communities per page.
    pub page_size: usize,
}

impl Default for TopLevelCommunityListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_TOP_LEVEL_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Parse and validate a json config.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a json config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading app config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check the values serde can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_page.top_level_community_list.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(())
    }

    /// Shortcut for a config with only the top-level list page size set.
    pub fn with_top_level_page_size(page_size: usize) -> Self {
        Self {
            home_page: HomePageConfig {
                top_level_community_list: TopLevelCommunityListConfig { page_size },
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_json() {
        let config = AppConfig::from_json_str(
            r#"{"homePage": {"topLevelCommunityList": {"pageSize": 7}}}"#,
        )
        .unwrap();
        assert_eq!(config.home_page.top_level_community_list.page_size, 7);
        assert_eq!(config, AppConfig::with_top_level_page_size(7));
    }

    #[test]
    fn test_default_page_size() {
        assert_eq!(
            AppConfig::default().home_page.top_level_community_list.page_size,
            DEFAULT_TOP_LEVEL_PAGE_SIZE
        );
    }

    #[test]
    fn test_rejects_bad_configs() {
        assert!(matches!(
            AppConfig::from_json_str(r#"{"homePage": {"topLevelCommunityList": {"pageSize": 0}}}"#),
            Err(ConfigError::InvalidPageSize)
        ));
        assert!(matches!(
            AppConfig::from_json_str(r#"{"homePage": {}}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::from_path("/definitely/not/a/real/config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
