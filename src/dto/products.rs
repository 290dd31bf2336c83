use crate::error::ValidationError;

/// A file picked in the product form. Nothing is uploaded until a backend
/// decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// What should happen to a product's image reference on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageChange {
    Keep,
    Remove,
    Url(String),
    Upload(ImageUpload),
}

/// Raw values as submitted by the create/edit form.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub code: String,
    pub stock: String,
    pub price: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_file: Option<ImageUpload>,
    pub image_removed: bool,
}

/// Field values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub code: String,
    pub stock: i64,
    pub price: f64,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Everything a backend needs to persist one create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub fields: ProductFields,
    pub image: ImageChange,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        stock: impl ToString,
        price: impl ToString,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            stock: stock.to_string(),
            price: price.to_string(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn image_file(mut self, upload: ImageUpload) -> Self {
        self.image_file = Some(upload);
        self
    }

    pub fn remove_image(mut self) -> Self {
        self.image_removed = true;
        self
    }

    pub fn validate(&self) -> Result<ProductFields, ValidationError> {
        Ok(ProductFields {
            name: required("name", &self.name)?,
            code: required("code", &self.code)?,
            stock: parse_stock(&self.stock)?,
            price: parse_price(&self.price)?,
            category: optional(self.category.as_deref()),
            description: optional(self.description.as_deref()),
        })
    }

    /// A non-empty upload wins over the removal flag, which wins over a
    /// typed URL. Anything else leaves the stored reference alone.
    pub fn image_change(&self) -> ImageChange {
        if let Some(upload) = self.image_file.as_ref().filter(|u| !u.is_empty()) {
            return ImageChange::Upload(upload.clone());
        }
        if self.image_removed {
            return ImageChange::Remove;
        }
        match optional(self.image_url.as_deref()) {
            Some(url) => ImageChange::Url(url),
            None => ImageChange::Keep,
        }
    }

    pub fn into_draft(self) -> Result<ProductDraft, ValidationError> {
        let fields = self.validate()?;
        let image = self.image_change();
        Ok(ProductDraft { fields, image })
    }
}

pub fn parse_stock(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    let stock: i64 = raw.parse().map_err(|_| ValidationError::NotANumber {
        field: "stock",
        value: raw.to_string(),
    })?;
    if stock < 0 {
        return Err(ValidationError::Negative { field: "stock" });
    }
    Ok(stock)
}

pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    let not_a_number = || ValidationError::NotANumber {
        field: "price",
        value: raw.to_string(),
    };
    let price: f64 = raw.parse().map_err(|_| not_a_number())?;
    if !price.is_finite() {
        return Err(not_a_number());
    }
    if price < 0.0 {
        return Err(ValidationError::Negative { field: "price" });
    }
    Ok(price)
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
