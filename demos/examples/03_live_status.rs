use gridwatch::{Gridwatch, UnitSelection};
use gridwatch_demos::common::{fixture_asset, fixture_now, get_connector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gw = Gridwatch::builder().with_connector(get_connector()).build()?;
    let asset = fixture_asset("Moray East")?;
    let token = gw.begin_selection();

    let status = gw
        .live_status(&asset, &UnitSelection::All, fixture_now(1, 0)?, &token)
        .await?;

    // Serialized form, as handed to a visualization layer.
    println!("{}", serde_json::to_string_pretty(&status)?);

    Ok(())
}
