//! Configuration loader for YAML files and `github:` references
//!
//! A source is either a YAML file describing a [`SourceConfig`] or a compact
//! repository reference such as `github:owner/repo@branch/path/to/file.txt`.
//! Environment overrides are applied last.

use crate::config::types::*;
use crate::errors::ConfigError;
use std::env;
use std::path::Path;
use tokio::fs;

/// Replaces `raw_base_url`, e.g. to point at a mirror.
pub const RAW_BASE_URL_ENV: &str = "ANTHOLOGY_RAW_BASE_URL";

/// Configuration loader with environment resolution
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a source (`github:` reference or YAML file path)
    pub async fn from_source(source: &str) -> Result<SourceConfig, ConfigError> {
        if source.starts_with("github:") {
            Self::resolve(Self::parse_github_ref(source)?)
        } else {
            Self::from_file(source).await
        }
    }

    /// Built-in defaults with environment overrides applied
    pub fn from_defaults() -> Result<SourceConfig, ConfigError> {
        Self::resolve(SourceConfig::default())
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<SourceConfig, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;

        Self::resolve(Self::from_str(&content)?)
    }

    /// Parse a YAML document; absent fields keep their defaults.
    ///
    /// Values are not validated here, since an environment override may still
    /// replace them. The `from_*` loaders validate after overrides are applied.
    pub fn from_str(content: &str) -> Result<SourceConfig, ConfigError> {
        if content.trim().is_empty() {
            return Ok(SourceConfig::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a repository reference from a string
    /// Supports formats like:
    /// - github:owner/repo
    /// - github:owner/repo@branch
    /// - github:owner/repo@branch/path/to/file.txt
    /// - github:owner/repo/path/to/file.txt
    pub fn parse_github_ref(input: &str) -> Result<SourceConfig, ConfigError> {
        let without_prefix = input
            .strip_prefix("github:")
            .ok_or_else(|| ConfigError::InvalidReference(input.to_string()))?;

        let (repo_part, ref_and_path) = match without_prefix.find('@') {
            Some(at_pos) => (
                &without_prefix[..at_pos],
                Some(&without_prefix[at_pos + 1..]),
            ),
            None => (without_prefix, None),
        };

        let repo_parts: Vec<&str> = repo_part.split('/').collect();
        if repo_parts.len() < 2 || repo_parts[0].is_empty() || repo_parts[1].is_empty() {
            return Err(ConfigError::InvalidReference(format!(
                "expected github:owner/repo, got '{}'",
                input
            )));
        }

        let mut file_path = if repo_parts.len() > 2 {
            repo_parts[2..].join("/")
        } else {
            DEFAULT_FILE_PATH.to_string()
        };

        let branch = match ref_and_path {
            Some(ref_and_path) => {
                let ref_parts: Vec<&str> = ref_and_path.split('/').collect();
                if ref_parts[0].is_empty() {
                    return Err(ConfigError::InvalidReference(format!(
                        "empty branch in '{}'",
                        input
                    )));
                }
                if ref_parts.len() > 1 {
                    file_path = ref_parts[1..].join("/");
                }
                ref_parts[0].to_string()
            }
            None => DEFAULT_BRANCH.to_string(),
        };

        Ok(SourceConfig {
            owner: repo_parts[0].to_string(),
            repo: repo_parts[1].to_string(),
            branch,
            file_path,
            ..Default::default()
        })
    }

    /// Apply overrides from the process environment, then validate
    fn resolve(config: SourceConfig) -> Result<SourceConfig, ConfigError> {
        Self::resolve_with(config, |key| env::var(key).ok())
    }

    fn resolve_with<F>(mut config: SourceConfig, lookup: F) -> Result<SourceConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::apply_overrides(&mut config, lookup);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides<F>(config: &mut SourceConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(RAW_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            log::debug!("Overriding raw_base_url from {}: {}", RAW_BASE_URL_ENV, url);
            config.raw_base_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_github_ref_defaults() {
        let config = ConfigLoader::parse_github_ref("github:alice/stories").unwrap();
        assert_eq!(config.owner, "alice");
        assert_eq!(config.repo, "stories");
        assert_eq!(config.branch, "main");
        assert_eq!(config.file_path, DEFAULT_FILE_PATH);
    }

    #[test]
    fn test_parse_github_ref_with_branch_and_path() {
        let config =
            ConfigLoader::parse_github_ref("github:alice/stories@drafts/Fantasy.txt").unwrap();
        assert_eq!(config.branch, "drafts");
        assert_eq!(config.file_path, "Fantasy.txt");
    }

    #[test]
    fn test_parse_github_ref_path_without_branch() {
        let config = ConfigLoader::parse_github_ref("github:alice/stories/books/one.txt").unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.file_path, "books/one.txt");
    }

    #[test]
    fn test_parse_github_ref_rejects_malformed() {
        assert!(ConfigLoader::parse_github_ref("alice/stories").is_err());
        assert!(ConfigLoader::parse_github_ref("github:alice").is_err());
        assert!(ConfigLoader::parse_github_ref("github:alice/stories@").is_err());
    }

    #[test]
    fn test_from_str_partial_yaml_keeps_defaults() {
        let config = ConfigLoader::from_str("branch: drafts\nline_breaks: spacer\n").unwrap();
        assert_eq!(config.branch, "drafts");
        assert_eq!(config.owner, DEFAULT_OWNER);
        assert_eq!(config.line_breaks, LineBreakStyle::Spacer);
    }

    #[test]
    fn test_from_str_rejects_unknown_line_break_style() {
        assert!(ConfigLoader::from_str("line_breaks: dotted\n").is_err());
    }

    #[test]
    fn test_override_applies_before_validation() {
        let parsed = ConfigLoader::from_str("raw_base_url: not-a-url\nbranch: drafts\n").unwrap();
        assert_eq!(parsed.raw_base_url, "not-a-url");

        let config = ConfigLoader::resolve_with(parsed.clone(), |key| {
            (key == RAW_BASE_URL_ENV).then(|| "http://127.0.0.1:9999".to_string())
        })
        .unwrap();
        assert_eq!(config.raw_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.branch, "drafts");

        let err = ConfigLoader::resolve_with(parsed, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_overrides_replace_base_url() {
        let mut config = SourceConfig::default();
        ConfigLoader::apply_overrides(&mut config, |key| {
            (key == RAW_BASE_URL_ENV).then(|| "http://127.0.0.1:9999".to_string())
        });
        assert_eq!(config.raw_base_url, "http://127.0.0.1:9999");

        let mut config = SourceConfig::default();
        ConfigLoader::apply_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config.raw_base_url, DEFAULT_RAW_BASE_URL);
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "owner: bob\nrepo: tales\nbranch: main\nfile_path: Fantasy.txt"
        )
        .unwrap();

        let config = ConfigLoader::from_file(file.path()).await.unwrap();
        assert_eq!(config.owner, "bob");
        assert_eq!(config.repo, "tales");
        assert_eq!(config.file_path, "Fantasy.txt");
    }

    #[tokio::test]
    async fn test_from_missing_file() {
        let err = ConfigLoader::from_file("/definitely/not/here.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
