use gridwatch::{Gridwatch, Resolution, SettlementRange, UnitSelection};
use gridwatch_demos::common::{fixture_asset, get_connector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gw = Gridwatch::builder().with_connector(get_connector()).build()?;
    let asset = fixture_asset("Moray East")?;
    let token = gw.begin_selection();

    let from = chrono::NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("bad date")?;
    let to = chrono::NaiveDate::from_ymd_opt(2024, 5, 31).ok_or("bad date")?;
    let range = SettlementRange::try_new(from, to)?;

    for resolution in [
        Resolution::Weekly,
        Resolution::BiWeekly,
        Resolution::Monthly,
    ] {
        let view = gw
            .historical_view(&asset, &UnitSelection::All, range, resolution, &token)
            .await?;
        println!("== {} ({} buckets, total {} MWh)", resolution.as_str(), view.buckets.len(), view.total);
        for b in &view.buckets {
            println!("{}  {:>12}", b.start.format("%Y-%m-%d %H:%M"), b.quantity);
        }
    }

    Ok(())
}
