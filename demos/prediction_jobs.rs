use std::time::Duration;

use cnheat_api::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let client = Client::connect(config).await?;
    let site = client.sites().first().ok_or("no sites on this account")?;

    let radios = client
        .get_site_radios(site.id.clone())
        .await?
        .into_iter()
        .filter_map(|radio| radio.id);

    let response = client
        .new_prediction()
        .name("demo")
        .radios(radios)
        .send()
        .await?;
    println!("{:#?}", response);

    for _ in 0..10 {
        for job in client.get_prediction_statuses().await? {
            println!("{:?}: {:?}", job.id, job.status);
        }
        tokio::time::sleep(Duration::from_secs(30)).await;
    }

    Ok(())
}
