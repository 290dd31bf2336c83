use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// Shown by the catalog and inventory views for products without an image.
pub const IMAGE_PLACEHOLDER: &str = "/placeholder.svg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "kode")]
    pub code: String,
    #[serde(rename = "stok", deserialize_with = "integer_or_string")]
    pub stock: i64,
    #[serde(rename = "harga", deserialize_with = "decimal_or_string")]
    pub price: f64,
    #[serde(rename = "kategori", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "deskripsi", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "gambar", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(IMAGE_PLACEHOLDER)
    }

    pub fn display_price(&self) -> String {
        format_rupiah(self.price)
    }
}

/// Formats an amount the way the id-ID locale renders IDR currency:
/// `Rp 1.250.000`, `Rp 1.500,5`.
pub fn format_rupiah(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = format!("{sign}Rp {grouped}");
    if fraction != 0 {
        let fraction = format!("{fraction:02}");
        out.push(',');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

// Laravel backends hand out auto-increment ids and decimal casts as strings,
// so the wire types are looser than the model.

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Int(n) => n.to_string(),
        RawScalar::Float(n) => n.to_string(),
        RawScalar::Text(s) => s,
    })
}

fn integer_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match RawScalar::deserialize(deserializer)? {
        RawScalar::Int(n) => Ok(n),
        RawScalar::Float(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
            Ok(n as i64)
        }
        RawScalar::Float(n) => Err(D::Error::custom(format!("expected integer, got {n}"))),
        RawScalar::Text(s) => s.trim().parse().map_err(D::Error::custom),
    }
}

fn decimal_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match RawScalar::deserialize(deserializer)? {
        RawScalar::Int(n) => Ok(n as f64),
        RawScalar::Float(n) => Ok(n),
        RawScalar::Text(s) => s.trim().parse().map_err(D::Error::custom),
    }
}
