use crate::domain::model::{FetchQuery, Recommendation, Requirement, ThemeRecord};
use crate::utils::error::{Result, ThemeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub query: FetchQuery,
    pub themes: Vec<ThemeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub outcomes: Vec<QueryOutcome>,
    pub requirement: Requirement,
    pub recommendation: Recommendation,
}

const RULE_WIDTH: usize = 50;
const FEATURE_SEPARATOR: &str = "; ";

impl AnalysisReport {
    pub fn new(
        outcomes: Vec<QueryOutcome>,
        requirement: Requirement,
        recommendation: Recommendation,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            outcomes,
            requirement,
            recommendation,
        }
    }

    pub fn theme_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.themes.len()).sum()
    }

    pub fn failed_queries(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_some()).count()
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Csv => self.to_csv(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // String 的 fmt::Write 不會失敗
        let _ = writeln!(out, "Astro Theme Analyzer");
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

        for outcome in &self.outcomes {
            let query = &outcome.query;
            match &outcome.error {
                Some(error) => {
                    let _ = writeln!(
                        out,
                        "Error fetching themes for {} with {} filter: {}",
                        query.technology, query.price, error
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "Fetched {} themes for {} with {} filter",
                        outcome.themes.len(),
                        query.technology,
                        query.price
                    );
                }
            }

            for theme in &outcome.themes {
                let _ = writeln!(out, "  - {}", display_or_dash(&theme.name));
                if !theme.description.is_empty() {
                    let _ = writeln!(out, "    {}", theme.description);
                }
                if !theme.repository_url.is_empty() {
                    let _ = writeln!(out, "    Repository: {}", theme.repository_url);
                }
                if !theme.demo_url.is_empty() {
                    let _ = writeln!(out, "    Demo: {}", theme.demo_url);
                }
                if !theme.features.is_empty() {
                    let _ = writeln!(out, "    Features: {}", theme.features.join(", "));
                }
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Suggested theme: {}",
            self.recommendation.suggested_theme
        );
        let _ = writeln!(out, "Reason: {}", self.recommendation.reason);
        let _ = writeln!(
            out,
            "Features: {}",
            self.recommendation.features.join(", ")
        );
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One row per fetched theme; the recommendation is not part of the CSV.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "technology",
            "price",
            "name",
            "description",
            "repository_url",
            "demo_url",
            "features",
        ])?;

        for outcome in &self.outcomes {
            for theme in &outcome.themes {
                let features = theme.features.join(FEATURE_SEPARATOR);
                writer.write_record([
                    outcome.query.technology.as_str(),
                    outcome.query.price.as_str(),
                    theme.name.as_str(),
                    theme.description.as_str(),
                    theme.repository_url.as_str(),
                    theme.demo_url.as_str(),
                    features.as_str(),
                ])?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ThemeError::IoError(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| ThemeError::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
