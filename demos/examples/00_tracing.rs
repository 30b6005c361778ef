use gridwatch::{Gridwatch, UnitSelection};
use gridwatch_demos::common::{fixture_asset, fixture_now, get_connector};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,gridwatch=trace,gridwatch_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let gw = Gridwatch::builder().with_connector(get_connector()).build()?;
    let asset = fixture_asset("Moray East")?;
    let token = gw.begin_selection();

    // The Moray East fixture carries one malformed PN row; it is skipped with a warning.
    let view = gw
        .generation_view(&asset, &UnitSelection::All, fixture_now(1, 0)?, &token)
        .await?;
    tracing::info!(samples = view.samples.len(), "generation view ready");

    // Second call with the same window is served from the session cache.
    let _ = gw
        .generation_view(&asset, &UnitSelection::All, fixture_now(1, 0)?, &token)
        .await?;

    Ok(())
}
