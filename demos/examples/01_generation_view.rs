use gridwatch::{Gridwatch, UnitSelection, ViewStatus};
use gridwatch_demos::common::{fixture_asset, fixture_now, get_connector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create the connector and build the orchestrator.
    let gw = Gridwatch::builder()
        .with_connector(get_connector())
        .preview_points(8)
        .build()?;

    // 2. Pick an asset and start a selection.
    let asset = fixture_asset("Seagreen")?;
    let token = gw.begin_selection();

    // 3. Reconcile the live feeds as of 00:20 UTC.
    let view = gw
        .generation_view(&asset, &UnitSelection::All, fixture_now(0, 20)?, &token)
        .await?;

    if view.status == ViewStatus::DataUnavailable {
        println!("No data for {}", view.asset);
        return Ok(());
    }

    // 4. Print the reconciled signal.
    println!("{} ({} units)", view.asset, view.units.len());
    println!("{:<25} {:>10} {:>10} {:>10}", "ts", "actual", "potential", "curtailed");
    for s in &view.samples {
        println!(
            "{:<25} {:>10} {:>10} {:>10}",
            s.ts.to_rfc3339(),
            s.actual_total,
            s.potential_total,
            s.curtailment_total
        );
    }
    println!("currently curtailed: {}", view.currently_curtailed);
    for w in &view.warnings {
        println!("warning: {} {}: {}", w.unit, w.dataset, w.error);
    }

    Ok(())
}
