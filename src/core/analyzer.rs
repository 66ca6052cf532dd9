use crate::core::recommend::suggest_theme;
use crate::core::report::{AnalysisReport, QueryOutcome};
use crate::domain::model::{FetchQuery, Requirement};
use crate::domain::ports::ThemeSource;
use crate::utils::error::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// How a failed catalog fetch affects the overall run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and carry on with no themes for that query.
    #[default]
    Lenient,
    /// Abort the run with the first failure.
    Strict,
}

pub struct ThemeAnalyzer<S: ThemeSource> {
    source: S,
    policy: FailurePolicy,
}

impl<S: ThemeSource> ThemeAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self::with_policy(source, FailurePolicy::default())
    }

    pub fn with_policy(source: S, policy: FailurePolicy) -> Self {
        Self { source, policy }
    }

    pub async fn run(
        &self,
        queries: &[FetchQuery],
        requirement: &Requirement,
    ) -> Result<AnalysisReport> {
        tracing::info!("Fetching {} catalog queries", queries.len());

        // 各查詢互不相依，同時送出；結果順序與查詢順序一致
        let results = join_all(queries.iter().map(|query| self.source.fetch_themes(query))).await;

        let mut outcomes = Vec::with_capacity(queries.len());
        for (query, result) in queries.iter().zip(results) {
            match result {
                Ok(themes) => outcomes.push(QueryOutcome {
                    query: query.clone(),
                    themes,
                    error: None,
                }),
                Err(e) if self.policy == FailurePolicy::Strict => {
                    tracing::error!("Fetching themes for {} failed: {}", query, e);
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::warn!("Error fetching themes for {}: {}", query, e);
                    outcomes.push(QueryOutcome {
                        query: query.clone(),
                        themes: Vec::new(),
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let recommendation = suggest_theme(requirement);
        tracing::info!("Suggested theme: {}", recommendation.suggested_theme);

        Ok(AnalysisReport::new(outcomes, requirement.clone(), recommendation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Price, ThemeRecord};
    use crate::utils::error::{NetworkError, ThemeError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails for the `broken` technology, returns one theme named after the query otherwise.
    struct MockSource {
        calls: AtomicUsize,
    }

    impl MockSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ThemeSource for MockSource {
        async fn fetch_themes(
            &self,
            query: &FetchQuery,
        ) -> std::result::Result<Vec<ThemeRecord>, NetworkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.technology == "broken" {
                return Err(NetworkError::Status {
                    url: format!("http://catalog/{}", query.technology),
                    status: 503,
                });
            }
            Ok(vec![ThemeRecord {
                name: format!("{}-{}", query.technology, query.price),
                ..ThemeRecord::default()
            }])
        }
    }

    #[tokio::test]
    async fn test_run_keeps_query_order() {
        let analyzer = ThemeAnalyzer::new(MockSource::new());
        let queries = vec![
            FetchQuery::new("react", Price::Free),
            FetchQuery::new("vue", Price::Paid),
        ];

        let report = analyzer
            .run(&queries, &Requirement::new("landing"))
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].themes[0].name, "react-free");
        assert_eq!(report.outcomes[1].themes[0].name, "vue-paid");
        assert_eq!(report.recommendation.suggested_theme, "astro-landing");
        assert_eq!(report.theme_count(), 2);
    }

    #[tokio::test]
    async fn test_lenient_policy_records_failures() {
        let source = MockSource::new();
        let analyzer = ThemeAnalyzer::new(source);
        let queries = vec![
            FetchQuery::new("broken", Price::Free),
            FetchQuery::new("svelte", Price::Free),
        ];

        let report = analyzer.run(&queries, &Requirement::default()).await.unwrap();

        assert_eq!(analyzer.source.calls.load(Ordering::SeqCst), 2);
        assert!(report.outcomes[0].themes.is_empty());
        assert!(report.outcomes[0]
            .error
            .as_deref()
            .unwrap()
            .contains("HTTP 503"));
        assert_eq!(report.outcomes[1].themes.len(), 1);
        assert!(report.outcomes[1].error.is_none());
        assert_eq!(report.recommendation.suggested_theme, "astro-paper");
    }

    #[tokio::test]
    async fn test_strict_policy_propagates_network_error() {
        let analyzer = ThemeAnalyzer::with_policy(MockSource::new(), FailurePolicy::Strict);
        let queries = vec![FetchQuery::new("broken", Price::Paid)];

        let err = analyzer
            .run(&queries, &Requirement::default())
            .await
            .unwrap_err();

        match err {
            ThemeError::Network(e) => assert_eq!(e.status(), Some(503)),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_queries_still_recommends() {
        let analyzer = ThemeAnalyzer::new(MockSource::new());

        let report =
            tokio_test::block_on(analyzer.run(&[], &Requirement::new("documentation"))).unwrap();

        assert!(report.outcomes.is_empty());
        assert_eq!(report.recommendation.suggested_theme, "starlight");
    }
}
