//! Product records.
//!
//! Records live in a schemaless store, so nothing here is enforced on write.
//! [`ProductRecord`] gives the well-known fields a typed, optional home and
//! keeps everything else in [`ProductRecord::extra`], so a document always
//! comes back out the way it went in (apart from its identifier, which is
//! rendered to its canonical string form).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::Result;
use crate::identifier::ObjectId;
use crate::store::Document;

/// Field names shared by the query builder and the stores.
pub mod fields {
    /// Identifier field.
    pub const ID: &str = "_id";
    /// Product title.
    pub const TITLE: &str = "title";
    /// Long description.
    pub const DESCRIPTION: &str = "description";
    /// Unit price.
    pub const PRICE: &str = "price";
    /// Category label.
    pub const CATEGORY: &str = "category";
    /// Image references.
    pub const IMAGES: &str = "images";
    /// Available size labels.
    pub const SIZES: &str = "sizes";
    /// Available color labels.
    pub const COLORS: &str = "colors";
    /// Average rating.
    pub const RATING: &str = "rating";
    /// Discount percentage.
    pub const DISCOUNT_PERCENT: &str = "discount_percent";
    /// Stock flag.
    pub const IN_STOCK: &str = "in_stock";
    /// Free-form tags.
    pub const TAGS: &str = "tags";
}

/// A product document.
///
/// Every field is optional. Numeric fields keep their JSON number form so an
/// integer discount stays an integer on the way back out.
///
/// Deserializing never rejects a field for its type: any JSON object becomes
/// a record through [`ProductRecord::from_document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRecord {
    /// Canonical string form of the store identifier.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Product title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    /// Category label (e.g. "Men", "Women", "Accessories").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Image URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Size labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    /// Color labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Average rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Number>,
    /// Discount percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Number>,
    /// Whether the product is in stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Free-form tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Any field not listed above, or a listed field whose stored value has
    /// an unexpected type.
    #[serde(flatten)]
    pub extra: Document,
}

impl ProductRecord {
    /// Builds a record from a stored document.
    ///
    /// Never fails: a well-known field with an unexpected type is kept
    /// verbatim in [`extra`](Self::extra) instead of being dropped. The
    /// identifier, if present, is normalized with [`normalize_id`].
    #[must_use]
    pub fn from_document(mut doc: Document) -> Self {
        let id = doc.remove(fields::ID).map(|v| normalize_id(&v));
        Self {
            id,
            title: take(&mut doc, fields::TITLE),
            description: take(&mut doc, fields::DESCRIPTION),
            price: take(&mut doc, fields::PRICE),
            category: take(&mut doc, fields::CATEGORY),
            images: take(&mut doc, fields::IMAGES),
            sizes: take(&mut doc, fields::SIZES),
            colors: take(&mut doc, fields::COLORS),
            rating: take(&mut doc, fields::RATING),
            discount_percent: take(&mut doc, fields::DISCOUNT_PERCENT),
            in_stock: take(&mut doc, fields::IN_STOCK),
            tags: take(&mut doc, fields::TAGS),
            extra: doc,
        }
    }

    /// Converts the record into an insertable document.
    ///
    /// The identifier is stripped: ids are assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized.
    pub fn to_document(&self) -> Result<Document> {
        let mut doc = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Document::new(),
        };
        doc.remove(fields::ID);
        Ok(doc)
    }

    /// Price as a float, if present and numeric.
    #[must_use]
    pub fn price_value(&self) -> Option<f64> {
        self.price.as_ref().and_then(Number::as_f64)
    }
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Document::deserialize(deserializer).map(Self::from_document)
    }
}

/// Renders a stored identifier to its canonical string form.
///
/// Native ids (`{"$oid": ...}` or 24-hex strings) become lowercase hex; any
/// other string passes through; other values use their JSON text.
#[must_use]
pub fn normalize_id(value: &Value) -> String {
    if let Some(oid) = ObjectId::from_json(value) {
        return oid.to_hex();
    }
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn take<T: DeserializeOwned>(doc: &mut Document, key: &str) -> Option<T> {
    let value = doc.remove(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<T>(value.clone()) {
        Ok(typed) => Some(typed),
        Err(_) => {
            doc.insert(key.to_string(), value);
            None
        }
    }
}

fn number(value: f64) -> Option<Number> {
    Number::from_f64(value)
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|s| (*s).to_string()).collect())
}

/// The built-in catalog used when `seed` is called without records.
#[must_use]
pub fn sample_products() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            title: Some("Men's Classic Denim Jacket".to_string()),
            description: Some("Timeless denim with a modern fit.".to_string()),
            price: number(79.99),
            category: Some("Men".to_string()),
            images: strings(&["https://images.unsplash.com/photo-1520975916090-3105956dac38?q=80&w=1200&auto=format&fit=crop"]),
            sizes: strings(&["S", "M", "L", "XL"]),
            colors: strings(&["Blue"]),
            rating: number(4.6),
            discount_percent: Some(Number::from(10)),
            in_stock: Some(true),
            tags: strings(&["jacket", "denim", "men"]),
            ..Default::default()
        },
        ProductRecord {
            title: Some("Women's Linen Summer Dress".to_string()),
            description: Some("Breathable, elegant, and perfect for warm days.".to_string()),
            price: number(64.50),
            category: Some("Women".to_string()),
            images: strings(&["https://images.unsplash.com/photo-1519238263530-99bdd11df2ea?q=80&w=1200&auto=format&fit=crop"]),
            sizes: strings(&["XS", "S", "M", "L"]),
            colors: strings(&["Beige", "Olive"]),
            rating: number(4.7),
            discount_percent: Some(Number::from(0)),
            in_stock: Some(true),
            tags: strings(&["dress", "linen", "women"]),
            ..Default::default()
        },
        ProductRecord {
            title: Some("Unisex Oversized Hoodie".to_string()),
            description: Some("Cozy fleece-lined hoodie for everyday comfort.".to_string()),
            price: number(49.00),
            category: Some("Accessories".to_string()),
            images: strings(&["https://images.unsplash.com/photo-1516826957135-700dedea698c?q=80&w=1200&auto=format&fit=crop"]),
            sizes: strings(&["S", "M", "L", "XL"]),
            colors: strings(&["Black", "Grey"]),
            rating: number(4.4),
            discount_percent: Some(Number::from(15)),
            in_stock: Some(true),
            tags: strings(&["hoodie", "unisex"]),
            ..Default::default()
        },
    ]
}

#[cfg(test)]
#[path = "product_tests.rs"]
mod tests;
