//! Raw record → normalized [`Product`].
//!
//! This is also the boundary where malformed input is rejected: a record is
//! only ever turned into a [`RawProductRecord`] through [`parse_record`] or
//! [`record_from_value`], so everything downstream is total.

use tracing::{debug, instrument};

use pagesmith_shared::{PagesmithError, Product, RawProductRecord, Result};

/// Field names every raw record must carry as strings.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "Product Name",
    "Concentration",
    "Skin Type",
    "Key Ingredients",
    "Benefits",
    "How to Use",
    "Side Effects",
    "Price",
];

/// Normalize a raw record into a product entity.
#[instrument(skip_all, fields(name = %raw.product_name))]
pub fn normalize(raw: &RawProductRecord) -> Product {
    let product = Product {
        name: raw.product_name.clone(),
        concentration: raw.concentration.clone(),
        skin_types: split_list(&raw.skin_type),
        key_ingredients: split_list(&raw.key_ingredients),
        benefits: split_list(&raw.benefits),
        how_to_use: raw.how_to_use.clone(),
        side_effects: raw.side_effects.clone(),
        price: raw.price.clone(),
    };

    debug!(
        skin_types = product.skin_types.len(),
        ingredients = product.key_ingredients.len(),
        benefits = product.benefits.len(),
        "product normalized"
    );

    product
}

/// Split a comma-separated field, trimming tokens and dropping empty ones.
pub fn split_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a JSON document into a raw record.
pub fn parse_record(json: &str) -> Result<RawProductRecord> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| PagesmithError::malformed(format!("product record is not valid JSON: {e}")))?;
    record_from_value(value)
}

/// Check the shape of a JSON value and convert it into a raw record.
///
/// Reports the first missing or non-string field by name.
pub fn record_from_value(value: serde_json::Value) -> Result<RawProductRecord> {
    let Some(object) = value.as_object() else {
        return Err(PagesmithError::malformed(format!(
            "product record must be a JSON object, got {}",
            json_kind(&value)
        )));
    };

    for field in REQUIRED_FIELDS {
        match object.get(field) {
            None => {
                return Err(PagesmithError::malformed(format!(
                    "missing required field \"{field}\""
                )));
            }
            Some(serde_json::Value::String(_)) => {}
            Some(other) => {
                return Err(PagesmithError::malformed(format!(
                    "field \"{field}\" must be a string, got {}",
                    json_kind(other)
                )));
            }
        }
    }

    serde_json::from_value(value).map_err(|e| PagesmithError::malformed(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Flatten a product back into raw form, joining lists with `", "`.
///
/// Normalizing the result yields `product` again.
pub fn denormalize(product: &Product) -> RawProductRecord {
    RawProductRecord::from(product)
}
