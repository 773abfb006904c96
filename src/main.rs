use anyhow::Result;
use clap::Parser;
use platformstats::*;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = cli::Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load(args.config.as_deref())?
        .with_overrides(args.rate, args.duration)?;
    tracing::debug!(?app_config, "effective config");

    let repo = platform_repo::PlatformRepo::from_config(&app_config.paths);
    let reporter = report::Reporter::new(repo, app_config, args.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = reporter.run(&args.selection(), &mut out).await;

    if summary.failures > 0 {
        tracing::info!(failures = summary.failures, "report finished with failures");
    }
    let code = summary.exit_code();
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
