#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::analyzer::FailurePolicy;
use crate::core::fetcher::{CatalogFetcher, DEFAULT_ENDPOINT};
use crate::core::parser::{CatalogParser, CatalogSelectors};
use crate::core::report::OutputFormat;
use crate::domain::model::{FetchQuery, Price, Requirement};
use crate::utils::error::{Result, ThemeError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_USER_AGENT: &str = concat!("astro-theme-analyzer/", env!("CARGO_PKG_VERSION"));

/// Fully resolved settings: built-in defaults, then the config file, then CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub technologies: Vec<String>,
    pub prices: Vec<Price>,
    pub requirement: Requirement,
    pub selectors: CatalogSelectors,
    pub format: OutputFormat,
    pub failure_policy: FailurePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        let query = FetchQuery::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            technologies: vec![query.technology],
            prices: vec![query.price],
            requirement: Requirement::default(),
            selectors: CatalogSelectors::default(),
            format: OutputFormat::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Settings {
    /// 以設定檔覆蓋預設值
    pub fn from_toml(config: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: config.source.endpoint.unwrap_or(defaults.endpoint),
            timeout_seconds: config
                .source
                .timeout_seconds
                .unwrap_or(defaults.timeout_seconds),
            user_agent: config.source.user_agent.unwrap_or(defaults.user_agent),
            technologies: config.query.technologies.unwrap_or(defaults.technologies),
            prices: config.query.prices.unwrap_or(defaults.prices),
            requirement: config
                .requirement
                .site_type
                .map(Requirement::new)
                .unwrap_or(defaults.requirement),
            selectors: config.parser.unwrap_or(defaults.selectors),
            format: config.output.format.unwrap_or(defaults.format),
            failure_policy: config
                .output
                .failure_policy
                .unwrap_or(defaults.failure_policy),
        }
    }

    /// Every technology crossed with every price, technology-major.
    pub fn queries(&self) -> Vec<FetchQuery> {
        let mut queries = Vec::with_capacity(self.technologies.len() * self.prices.len());
        for technology in &self.technologies {
            for price in &self.prices {
                let query = FetchQuery::new(technology.trim(), *price);
                if !queries.contains(&query) {
                    queries.push(query);
                }
            }
        }
        queries
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn build_fetcher(&self) -> Result<CatalogFetcher> {
        let parser = CatalogParser::new(&self.selectors)?;
        CatalogFetcher::new(&self.endpoint, self.timeout(), &self.user_agent, parser)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("source.endpoint", &self.endpoint)?;
        validate_range(
            "source.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_non_empty_string("source.user_agent", &self.user_agent)?;

        if self.technologies.is_empty() {
            return Err(ThemeError::MissingConfigError {
                field: "query.technologies".to_string(),
            });
        }
        for technology in &self.technologies {
            validate_non_empty_string("query.technologies", technology)?;
        }

        if self.prices.is_empty() {
            return Err(ThemeError::MissingConfigError {
                field: "query.prices".to_string(),
            });
        }

        // 選擇器在此先編譯一次，錯誤不會拖到請求時才出現
        CatalogParser::new(&self.selectors)?;
        Ok(())
    }
}
