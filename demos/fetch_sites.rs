use cnheat_api::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let client = Client::connect(config).await?;

    for site in client.sites() {
        let radios = client.get_site_radios(site.id.clone()).await?;
        let name = site.name.as_deref().unwrap_or("unnamed");
        println!("{} ({}): {} radios", name, site.id, radios.len());
    }

    println!("{:#?}", client.get_credits().await?);

    Ok(())
}
