use aki_inventory::{config::AppConfig, store::LocalStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    // Opening the store applies any pending migration.
    LocalStore::open(&config.store_url).await?;
    println!("Migrations applied to {}", config.store_url);
    Ok(())
}
