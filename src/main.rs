use anyhow::Result;
use sonardrift::models::FleetSummary;
use sonardrift::timing::ScopedTimer;
use sonardrift::*;
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

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let _run_timer = ScopedTimer::new("run");
    let app_config = config::AppConfig::load()?;
    tracing::info!(
        version = version::VERSION,
        data_directory = %app_config.ingestion.data_directory,
        "starting drift run"
    );

    let coordinator =
        ingest::IngestionCoordinator::new(app_config.ingestion.to_ingestion_config());
    let batch = {
        let _t = ScopedTimer::new("ingest");
        coordinator.ingest().await?
    };
    if app_config.ingestion.require_observations {
        batch.store.require_non_empty()?;
    }

    let sorted = {
        let _t = ScopedTimer::new("sort");
        batch.store.sort_for_change_detection()
    };
    tracing::info!(rows = sorted.len(), "observations sorted");

    let records = {
        let _t = ScopedTimer::new("compute changes");
        detect::detect_changes(&sorted)
    };

    let summary = FleetSummary::from_change_records(&records, app_config.report.top_params);
    print!("{}", report::render_summary(&summary));

    if let Some(ref path) = app_config.report.export_path {
        report::export_change_counts(&records, std::path::Path::new(path))?;
    }

    Ok(())
}
