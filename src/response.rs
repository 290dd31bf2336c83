use std::collections::BTreeMap;

use serde::Deserialize;

/// `{ "message": ..., "data": ... }` as produced by Laravel API resources.
/// Only `data` is read; the success message is not shown anywhere.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Successful bodies come either bare or wrapped in an [`ApiResponse`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Body<T> {
    Bare(T),
    Wrapped(ApiResponse<T>),
}

impl<T> Body<T> {
    pub fn into_inner(self) -> T {
        match self {
            Body::Bare(inner) => inner,
            Body::Wrapped(response) => response.data,
        }
    }
}

/// Error payload of a non-success response, e.g. a 422 validation failure:
/// `{ "message": "...", "errors": { "kode": ["..."] } }`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}
