use crate::core::parser::CatalogParser;
use crate::domain::model::{FetchQuery, ThemeRecord};
use crate::domain::ports::ThemeSource;
use crate::utils::error::{NetworkError, Result, ThemeError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://astro.build/themes/1/";

/// Fetches one catalog page per query and hands the body to a [`CatalogParser`].
pub struct CatalogFetcher {
    client: Client,
    endpoint: Url,
    parser: CatalogParser,
}

impl CatalogFetcher {
    pub fn new(
        endpoint: &str,
        timeout: Duration,
        user_agent: &str,
        parser: CatalogParser,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| ThemeError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ThemeError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint,
            parser,
        })
    }

    /// 以 `technology[]` / `price[]` 查詢參數組出目錄網址
    pub fn query_url(&self, query: &FetchQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("technology[]", &query.technology)
            .append_pair("price[]", query.price.as_str());
        url
    }
}

#[async_trait]
impl ThemeSource for CatalogFetcher {
    async fn fetch_themes(
        &self,
        query: &FetchQuery,
    ) -> std::result::Result<Vec<ThemeRecord>, NetworkError> {
        let url = self.query_url(query);
        tracing::debug!("Making catalog request to: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.to_string(),
                source,
            })?;

        let themes = self.parser.parse(&body, &url);
        tracing::info!(
            "Fetched {} themes for {} with {} filter",
            themes.len(),
            query.technology,
            query.price
        );

        Ok(themes)
    }
}
