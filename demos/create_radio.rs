use cnheat_api::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let client = Client::connect(config).await?;

    let site = client.sites().first().ok_or("no sites on this account")?;
    let antennas = client.get_antennas(5.8).await?;
    let antenna = antennas.first().ok_or("no antennas at 5.8 GHz")?;

    let response = client
        .new_radio(site.id.clone())
        .frequency(5.8)
        .antenna(antenna.id.clone())
        .azimuth(120)
        .height(30)
        .send()
        .await?;

    println!("{:#?}", response);

    Ok(())
}
