use std::time::Duration;

use aki_inventory::{
    ProductApi,
    backend::{LocalBackend, local::PRODUCTS_KEY},
    config::AppConfig,
    dto::products::ProductForm,
    store::LocalStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let store = LocalStore::open(&config.store_url).await?;
    if store.remove_item(PRODUCTS_KEY).await? {
        println!("Cleared existing products in {}", config.store_url);
    }

    let api = ProductApi::new(LocalBackend::new(store).with_latency(Duration::ZERO));
    seed_products(&api).await?;
    Ok(())
}

async fn seed_products(api: &ProductApi) -> anyhow::Result<()> {
    let products = vec![
        ("Aki Kering 6V 4.5Ah", "AKI001", 25, 85000, "Aki Kering", "Untuk mobil-mobilan anak"),
        ("Aki Kering 12V 7Ah", "AKI002", 12, 165000, "Aki Kering", "Untuk motor mainan 12V"),
        ("Aki Basah 6V 10Ah", "AKI003", 8, 120000, "Aki Basah", "Perlu perawatan air aki"),
        ("Charger Aki 6V", "CHG001", 30, 45000, "Aksesoris", "Pengisi daya aki 6V"),
    ];

    for (name, code, stock, price, category, description) in products {
        let product = api
            .create(
                ProductForm::new(name, code, stock, price)
                    .category(category)
                    .description(description),
            )
            .await?;
        println!("Seeded {} ({})", product.name, product.id);
    }

    Ok(())
}
