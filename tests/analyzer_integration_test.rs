use astro_theme_analyzer::config::toml_config::TomlConfig;
use astro_theme_analyzer::utils::validation::Validate;
use astro_theme_analyzer::{
    FailurePolicy, OutputFormat, Price, Requirement, Settings, ThemeAnalyzer, ThemeError,
};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_end_to_end_with_config_file() {
    let server = MockServer::start();

    let react_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/themes/1/")
            .query_param("technology[]", "react");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(r#"<div class="theme"><span class="title">Accessible Astro</span></div>"#);
    });

    let vue_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/themes/1/")
            .query_param("technology[]", "vue");
        then.status(503);
    });

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[source]
endpoint = "{}"
timeout_seconds = 5

[query]
technologies = ["react", "vue"]
prices = ["free"]

[requirement]
site_type = "DOCUMENTATION"

[parser]
card = "div.theme"
name = ".title"

[output]
format = "csv"
"#,
        server.url("/themes/1/")
    )
    .unwrap();

    let settings = Settings::from_toml(TomlConfig::from_file(config_file.path()).unwrap());
    settings.validate().unwrap();
    assert_eq!(settings.format, OutputFormat::Csv);

    let fetcher = settings.build_fetcher().unwrap();
    let analyzer = ThemeAnalyzer::with_policy(fetcher, settings.failure_policy);
    let report = analyzer
        .run(&settings.queries(), &settings.requirement)
        .await
        .unwrap();

    react_mock.assert();
    vue_mock.assert();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].themes[0].name, "Accessible Astro");
    assert!(report.outcomes[1].error.as_deref().unwrap().contains("503"));
    assert_eq!(report.failed_queries(), 1);
    assert_eq!(report.recommendation.suggested_theme, "starlight");

    let csv = report.render(settings.format).unwrap();
    assert!(csv.contains("react,free,Accessible Astro,,,,"));
}

#[tokio::test]
async fn test_lenient_run_survives_unreachable_catalog() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let settings = Settings {
        endpoint: format!("http://127.0.0.1:{}/themes/1/", port),
        ..Settings::default()
    };
    let analyzer = ThemeAnalyzer::new(settings.build_fetcher().unwrap());

    let report = analyzer
        .run(&settings.queries(), &Requirement::default())
        .await
        .unwrap();

    assert_eq!(report.theme_count(), 0);
    assert_eq!(report.failed_queries(), 1);
    assert_eq!(report.recommendation.suggested_theme, "astro-paper");

    let text = report.render(OutputFormat::Text).unwrap();
    assert!(text.contains("Error fetching themes for react with free filter"));
    assert!(text.contains("Suggested theme: astro-paper"));
}

#[tokio::test]
async fn test_strict_run_fails_on_http_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/themes/1/");
        then.status(404);
    });

    let settings = Settings {
        endpoint: server.url("/themes/1/"),
        prices: vec![Price::Paid],
        failure_policy: FailurePolicy::Strict,
        ..Settings::default()
    };
    let fetcher = settings.build_fetcher().unwrap();
    let analyzer = ThemeAnalyzer::with_policy(fetcher, settings.failure_policy);

    let err = analyzer
        .run(&settings.queries(), &settings.requirement)
        .await
        .unwrap_err();

    match err {
        ThemeError::Network(e) => assert_eq!(e.status(), Some(404)),
        other => panic!("expected network error, got {:?}", other),
    }
}
