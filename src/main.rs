use astro_theme_analyzer::utils::error::ErrorSeverity;
use astro_theme_analyzer::utils::{logger, validation::Validate};
use astro_theme_analyzer::{supported_site_types, CliConfig, ThemeAnalyzer, ThemeError};
use anyhow::Context;
use clap::Parser;
use std::io::Write;

fn exit_code(e: &ThemeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_failure(stage: &str, e: &ThemeError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting astro-theme-analyzer");
    tracing::debug!("CLI config: {:?}", cli);

    if cli.list_site_types {
        for site_type in supported_site_types() {
            println!("{}", site_type);
        }
        return Ok(());
    }

    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => report_failure("Configuration", &e),
    };

    let fetcher = match settings.build_fetcher() {
        Ok(fetcher) => fetcher,
        Err(e) => report_failure("Catalog client setup", &e),
    };

    let analyzer = ThemeAnalyzer::with_policy(fetcher, settings.failure_policy);
    let report = match analyzer
        .run(&settings.queries(), &settings.requirement)
        .await
    {
        Ok(report) => report,
        Err(e) => report_failure("Theme analysis", &e),
    };

    if report.failed_queries() > 0 {
        tracing::warn!(
            "{} of {} catalog queries failed, continuing with partial results",
            report.failed_queries(),
            report.outcomes.len()
        );
    }

    let rendered = match report.render(settings.format) {
        Ok(rendered) => rendered,
        Err(e) => report_failure("Rendering report", &e),
    };
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .context("writing report to stdout")?;

    tracing::info!("✅ Done: {} themes fetched", report.theme_count());
    Ok(())
}
