pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::Settings;
pub use crate::core::{
    analyzer::{FailurePolicy, ThemeAnalyzer},
    fetcher::CatalogFetcher,
    parser::{CatalogParser, CatalogSelectors},
    recommend::{suggest_theme, supported_site_types},
    report::{AnalysisReport, OutputFormat},
};
pub use crate::domain::model::{FetchQuery, Price, Recommendation, Requirement, ThemeRecord};
pub use crate::domain::ports::ThemeSource;
pub use crate::utils::error::{NetworkError, Result, ThemeError};
