use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::core::analyzer::FailurePolicy;
use crate::core::report::OutputFormat;
use crate::domain::model::{Price, Requirement};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "astro-theme-analyzer")]
#[command(about = "Fetch Astro themes from the catalog and suggest one for your site")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Catalog endpoint (defaults to the Astro themes page)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Technology filters, comma separated (e.g. react,vue)
    #[arg(long, value_delimiter = ',')]
    pub technology: Vec<String>,

    /// Price filters, comma separated
    #[arg(long, value_delimiter = ',', value_enum)]
    pub price: Vec<Price>,

    /// Site category to recommend a theme for
    #[arg(long = "site-type", visible_alias = "type")]
    pub site_type: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Fail with a non-zero exit code when a fetch fails")]
    pub strict: bool,

    #[arg(long, help = "List the site types with a dedicated recommendation")]
    pub list_site_types: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 預設值 → 設定檔 → 命令列旗標
    pub fn resolve(&self) -> Result<Settings> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from_toml(file_config);

        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if !self.technology.is_empty() {
            settings.technologies = self.technology.clone();
        }
        if !self.price.is_empty() {
            settings.prices = self.price.clone();
        }
        if let Some(site_type) = &self.site_type {
            settings.requirement = Requirement::new(site_type.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if self.strict {
            settings.failure_policy = FailurePolicy::Strict;
        }

        Ok(settings)
    }
}
