use std::sync::Arc;

use crate::{
    backend::{LocalBackend, ProductBackend, RemoteBackend},
    config::{AppConfig, BackendKind},
    dto::products::ProductForm,
    error::AppResult,
    models::Product,
    store::LocalStore,
};

/// Product operations for the catalog and inventory views.
///
/// Behaves the same whichever backend is plugged in. Invalid forms are
/// rejected before the backend is touched; every other failure is logged
/// and handed back unchanged.
#[derive(Clone)]
pub struct ProductApi {
    backend: Arc<dyn ProductBackend>,
}

impl std::fmt::Debug for ProductApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductApi")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl ProductApi {
    pub fn new(backend: impl ProductBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn remote(base_url: &str, config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(RemoteBackend::new(base_url, config.http_timeout)?))
    }

    pub fn local(store: LocalStore, config: &AppConfig) -> Self {
        Self::new(LocalBackend::new(store).with_latency(config.mock_latency))
    }

    /// Build the client for whichever backend the configuration selects.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let api = match config.backend {
            BackendKind::Remote => Self::remote(&config.api_base_url, config)?,
            BackendKind::Local => Self::local(LocalStore::open(&config.store_url).await?, config),
        };
        tracing::info!(backend = api.backend_name(), "product api ready");
        Ok(api)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn list(&self) -> AppResult<Vec<Product>> {
        self.backend
            .list()
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to load products"))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        self.backend
            .get(id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, id, "failed to load product"))
    }

    pub async fn create(&self, form: ProductForm) -> AppResult<Product> {
        let draft = form.into_draft()?;
        let product = self
            .backend
            .create(draft)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to create product"))?;
        tracing::info!(id = %product.id, code = %product.code, "product created");
        Ok(product)
    }

    pub async fn update(&self, id: &str, form: ProductForm) -> AppResult<Option<Product>> {
        let draft = form.into_draft()?;
        let product = self
            .backend
            .update(id, draft)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, id, "failed to update product"))?;
        match &product {
            Some(product) => tracing::info!(id = %product.id, "product updated"),
            None => tracing::debug!(id, "update skipped, product not found"),
        }
        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let removed = self
            .backend
            .delete(id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, id, "failed to delete product"))?;
        tracing::info!(id, removed, "product delete finished");
        Ok(removed)
    }
}
