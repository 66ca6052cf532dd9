use crate::domain::model::{FetchQuery, ThemeRecord};
use crate::utils::error::NetworkError;
use async_trait::async_trait;

/// Anything that can list themes for a catalog query.
#[async_trait]
pub trait ThemeSource: Send + Sync {
    async fn fetch_themes(&self, query: &FetchQuery) -> Result<Vec<ThemeRecord>, NetworkError>;
}
