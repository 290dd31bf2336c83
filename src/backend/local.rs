use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    backend::ProductBackend,
    dto::products::{ImageChange, ImageUpload, ProductDraft},
    error::AppResult,
    models::Product,
    store::LocalStore,
};

/// Slot holding the whole product collection.
pub const PRODUCTS_KEY: &str = "products";

/// Mock backend keeping every product in one slot of a [`LocalStore`].
///
/// Each write loads the collection, changes it and stores it back while
/// holding `write_lock`, so no record is dropped by an interleaved save.
/// Updates to the same product still race on their simulated latency and the
/// last one to reach the store wins.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    store: LocalStore,
    latency: Duration,
    write_lock: Arc<Mutex<()>>,
}

impl LocalBackend {
    pub fn new(store: LocalStore) -> Self {
        Self {
            store,
            latency: Duration::ZERO,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Delay applied before create and update complete, to mimic a network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn load(&self) -> AppResult<Vec<Product>> {
        Ok(self
            .store
            .get_json::<Vec<Product>>(PRODUCTS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, products: &[Product]) -> AppResult<()> {
        self.store.set_json(PRODUCTS_KEY, products).await
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Stand-in for a real upload: a path derived from the current time and the
/// file name. Nothing is written anywhere.
pub fn pseudo_upload_path(upload: &ImageUpload) -> String {
    format!("/uploads/{}-{}", Utc::now().timestamp_millis(), upload.file_name)
}

fn resolve_image(change: ImageChange, current: Option<String>) -> Option<String> {
    match change {
        ImageChange::Upload(upload) => Some(pseudo_upload_path(&upload)),
        ImageChange::Remove => None,
        ImageChange::Url(url) => Some(url),
        ImageChange::Keep => current,
    }
}

#[async_trait]
impl ProductBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        self.load().await
    }

    async fn get(&self, id: &str) -> AppResult<Option<Product>> {
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        self.simulate_latency().await;

        let ProductDraft { fields, image } = draft;
        let product = Product {
            id: Uuid::new_v4().simple().to_string(),
            name: fields.name,
            code: fields.code,
            stock: fields.stock,
            price: fields.price,
            category: fields.category,
            description: fields.description,
            image: resolve_image(image, None),
        };

        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        products.push(product.clone());
        self.save(&products).await?;
        tracing::debug!(id = %product.id, total = products.len(), "stored new product");
        Ok(product)
    }

    async fn update(&self, id: &str, draft: ProductDraft) -> AppResult<Option<Product>> {
        self.simulate_latency().await;

        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let Some(existing) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        let ProductDraft { fields, image } = draft;
        existing.name = fields.name;
        existing.code = fields.code;
        existing.stock = fields.stock;
        existing.price = fields.price;
        existing.category = fields.category;
        existing.description = fields.description;
        existing.image = resolve_image(image, existing.image.take());
        let updated = existing.clone();

        self.save(&products).await?;
        tracing::debug!(id = %updated.id, "stored updated product");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }
        self.save(&products).await?;
        tracing::debug!(id = %id, remaining = products.len(), "removed product");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_path_keeps_file_name() {
        let path = pseudo_upload_path(&ImageUpload::new("aki.png", vec![1]));
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with("-aki.png"));
    }

    #[test]
    fn keep_preserves_and_remove_clears() {
        let current = Some("/uploads/1-old.png".to_string());
        assert_eq!(resolve_image(ImageChange::Keep, current.clone()), current);
        assert_eq!(resolve_image(ImageChange::Remove, current.clone()), None);
        assert_eq!(
            resolve_image(ImageChange::Url("https://cdn/a.jpg".into()), current),
            Some("https://cdn/a.jpg".to_string())
        );
    }
}
