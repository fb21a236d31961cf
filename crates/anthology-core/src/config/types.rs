//! Source location and rendering options

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_OWNER: &str = "wllclngn";
pub const DEFAULT_REPO: &str = "SomeKindofFiction";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_FILE_PATH: &str = "src/Fantasy.txt";

/// How a line break inside an entry is drawn in the output markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreakStyle {
    /// `<br>`
    #[default]
    Break,
    /// An empty spacer paragraph, `<p class="desktop-width"></p>`
    Spacer,
}

/// Immutable description of where the anthology lives and how to draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub raw_base_url: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub file_path: String,
    pub line_breaks: LineBreakStyle,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            file_path: DEFAULT_FILE_PATH.to_string(),
            line_breaks: LineBreakStyle::default(),
        }
    }
}

impl SourceConfig {
    /// `<raw_base_url>/<owner>/<repo>/<branch>/<file_path>`
    pub fn raw_file_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            self.file_path.trim_start_matches('/')
        )
    }

    /// Display name of the source, `owner/repo@branch:file_path`.
    pub fn describe(&self) -> String {
        format!(
            "{}/{}@{}:{}",
            self.owner, self.repo, self.branch, self.file_path
        )
    }

    pub fn with_raw_base_url(mut self, url: impl Into<String>) -> Self {
        self.raw_base_url = url.into();
        self
    }

    pub fn with_line_breaks(mut self, style: LineBreakStyle) -> Self {
        self.line_breaks = style;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("branch", &self.branch),
            ("file_path", &self.file_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "'{}' must not be empty",
                    field
                )));
            }
        }

        let url = reqwest::Url::parse(&self.raw_base_url).map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid raw_base_url '{}': {}",
                self.raw_base_url, e
            ))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "raw_base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }
}
