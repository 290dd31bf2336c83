use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode, Url,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    backend::ProductBackend,
    dto::products::{ImageChange, ImageUpload, ProductDraft},
    error::{AppError, AppResult, TransportError},
    models::Product,
    response::{Body, ErrorBody},
};

pub const COLLECTION_PATH: &str = "barang";

/// JSON body for create and full-field update.
#[derive(Debug, Serialize)]
struct ProductPayload<'a> {
    nama: &'a str,
    kode: &'a str,
    stok: i64,
    harga: f64,
    kategori: Option<&'a str>,
    deskripsi: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gambar: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    gambar_removed: bool,
}

impl<'a> From<&'a ProductDraft> for ProductPayload<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        let fields = &draft.fields;
        let (gambar, gambar_removed) = match &draft.image {
            ImageChange::Url(url) => (Some(Some(url.as_str())), false),
            ImageChange::Remove => (Some(None), true),
            ImageChange::Keep | ImageChange::Upload(_) => (None, false),
        };
        Self {
            nama: &fields.name,
            kode: &fields.code,
            stok: fields.stock,
            harga: fields.price,
            kategori: fields.category.as_deref(),
            deskripsi: fields.description.as_deref(),
            gambar,
            gambar_removed,
        }
    }
}

/// `""`, `"."` and `".."` cannot name a record as a path segment.
fn addressable(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

/// HTTP backend speaking the `/barang` resource API.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: Client,
    base_url: Url,
}

impl RemoteBackend {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let invalid = |reason: String| {
            AppError::Transport(TransportError::InvalidUrl {
                url: base_url.to_string(),
                reason,
            })
        };
        let parsed = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".into()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    fn collection_url(&self) -> Url {
        self.endpoint(None)
    }

    /// Ids are opaque, so they go in as one escaped path segment.
    fn item_url(&self, id: &str) -> Url {
        self.endpoint(Some(id))
    }

    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(COLLECTION_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        tracing::debug!(
            status = %response.status(),
            url = %response.url(),
            "backend responded"
        );
        Ok(response)
    }

    /// Multipart body used when a file rides along. `method` is the Laravel
    /// `_method` override for verbs that cannot carry form data.
    fn multipart(
        draft: &ProductDraft,
        upload: &ImageUpload,
        method: Option<&'static str>,
    ) -> AppResult<Form> {
        let fields = &draft.fields;
        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            part = part.mime_str(content_type)?;
        }

        let mut form = Form::new()
            .text("nama", fields.name.clone())
            .text("kode", fields.code.clone())
            .text("stok", fields.stock.to_string())
            .text("harga", fields.price.to_string())
            .text("kategori", fields.category.clone().unwrap_or_default())
            .text("deskripsi", fields.description.clone().unwrap_or_default())
            .part("gambar", part);
        if let Some(method) = method {
            form = form.text("_method", method);
        }
        Ok(form)
    }

    async fn read_body<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let bytes = response.bytes().await?;
        let body: Body<T> = serde_json::from_slice(&bytes)?;
        Ok(body.into_inner())
    }

    async fn api_error(response: Response) -> AppError {
        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return err.into(),
        };
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body
            .message
            .or_else(|| {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        AppError::Api {
            status: status.as_u16(),
            message,
            errors: body.errors,
        }
    }
}

#[async_trait]
impl ProductBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let response = self
            .send(self.request(Method::GET, self.collection_url()))
            .await?;
        Self::read_body(response).await
    }

    async fn get(&self, id: &str) -> AppResult<Option<Product>> {
        if !addressable(id) {
            return Ok(None);
        }
        let response = self.send(self.request(Method::GET, self.item_url(id))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_body(response).await.map(Some)
    }

    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        let request = self.request(Method::POST, self.collection_url());
        let request = match &draft.image {
            ImageChange::Upload(upload) => request.multipart(Self::multipart(&draft, upload, None)?),
            _ => request.json(&ProductPayload::from(&draft)),
        };
        let response = self.send(request).await?;
        Self::read_body(response).await
    }

    async fn update(&self, id: &str, draft: ProductDraft) -> AppResult<Option<Product>> {
        if !addressable(id) {
            return Ok(None);
        }
        let url = self.item_url(id);
        let request = match &draft.image {
            ImageChange::Upload(upload) => self
                .request(Method::POST, url)
                .multipart(Self::multipart(&draft, upload, Some("PUT"))?),
            _ => self
                .request(Method::PUT, url)
                .json(&ProductPayload::from(&draft)),
        };
        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_body(response).await.map(Some)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        if !addressable(id) {
            return Ok(false);
        }
        let response = self
            .send(self.request(Method::DELETE, self.item_url(id)))
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(Self::api_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::products::ProductForm;

    fn draft(form: ProductForm) -> ProductDraft {
        form.into_draft().unwrap()
    }

    #[test]
    fn payload_omits_image_when_kept() {
        let draft = draft(ProductForm::new("Aki A", "AKI001", 10, 50000));
        let json = serde_json::to_value(ProductPayload::from(&draft)).unwrap();
        assert_eq!(json["nama"], "Aki A");
        assert_eq!(json["stok"], 10);
        assert_eq!(json["harga"], 50000.0);
        assert!(json["kategori"].is_null());
        assert!(json.get("gambar").is_none());
        assert!(json.get("gambar_removed").is_none());
    }

    #[test]
    fn payload_signals_removal() {
        let draft = draft(ProductForm::new("Aki A", "AKI001", 10, 50000).remove_image());
        let json = serde_json::to_value(ProductPayload::from(&draft)).unwrap();
        assert!(json["gambar"].is_null());
        assert!(json.get("gambar").is_some());
        assert_eq!(json["gambar_removed"], true);
    }

    #[test]
    fn item_urls_escape_the_id() {
        let backend = RemoteBackend::new("http://localhost:8000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.collection_url().as_str(), "http://localhost:8000/api/barang");
        assert_eq!(backend.item_url("42").as_str(), "http://localhost:8000/api/barang/42");
        assert_eq!(
            backend.item_url("?page=1").as_str(),
            "http://localhost:8000/api/barang/%3Fpage=1"
        );
        assert_eq!(backend.item_url("#frag").as_str(), "http://localhost:8000/api/barang/%23frag");
        assert_eq!(backend.item_url("a/b").as_str(), "http://localhost:8000/api/barang/a%2Fb");
    }

    #[test]
    fn rejects_unusable_base_url() {
        let err = RemoteBackend::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(err.is_transport());
        assert!(RemoteBackend::new("mailto:toko@example.com", Duration::from_secs(1)).is_err());
    }
}
