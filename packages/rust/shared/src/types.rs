//! Core domain types: the raw record, the normalized product, questions, and
//! the three page documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PagesmithError;

/// Current schema version for the output manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one generation run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Product records
// ---------------------------------------------------------------------------

/// The flat product record as it arrives from the source file.
///
/// Every field is required and must be a JSON string. List-like fields are
/// comma-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProductRecord {
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Concentration")]
    pub concentration: String,
    #[serde(rename = "Skin Type")]
    pub skin_type: String,
    #[serde(rename = "Key Ingredients")]
    pub key_ingredients: String,
    #[serde(rename = "Benefits")]
    pub benefits: String,
    #[serde(rename = "How to Use")]
    pub how_to_use: String,
    #[serde(rename = "Side Effects")]
    pub side_effects: String,
    #[serde(rename = "Price")]
    pub price: String,
}

/// Normalized product entity with list-valued attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub concentration: String,
    /// Skin types in source order, trimmed, empties dropped.
    pub skin_types: Vec<String>,
    pub key_ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub how_to_use: String,
    pub side_effects: String,
    pub price: String,
}

impl From<&Product> for RawProductRecord {
    fn from(p: &Product) -> Self {
        Self {
            product_name: p.name.clone(),
            concentration: p.concentration.clone(),
            skin_type: p.skin_types.join(", "),
            key_ingredients: p.key_ingredients.join(", "),
            benefits: p.benefits.join(", "),
            how_to_use: p.how_to_use.clone(),
            side_effects: p.side_effects.clone(),
            price: p.price.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// The five fixed question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Informational,
    Usage,
    Safety,
    Purchase,
    Comparison,
}

impl QuestionCategory {
    /// Lowercase name, also used as the question id prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Usage => "usage",
            Self::Safety => "safety",
            Self::Purchase => "purchase",
            Self::Comparison => "comparison",
        }
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated user question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuestion {
    /// `<category>_<position in the full catalog>`, e.g. `safety_9`.
    pub id: String,
    pub category: QuestionCategory,
    pub question: String,
}

/// A question paired with its resolved answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    pub question: String,
    pub answer: String,
    pub category: QuestionCategory,
}

// ---------------------------------------------------------------------------
// FAQ page
// ---------------------------------------------------------------------------

/// One category block of the FAQ page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSection {
    pub category: QuestionCategory,
    pub items: Vec<QaItem>,
}

/// The `faq.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPage {
    pub product_name: String,
    pub sections: Vec<FaqSection>,
}

impl FaqPage {
    /// Total number of Q&A items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Which FAQ rendering variant to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqVariant {
    #[default]
    Basic,
    Compact,
}

impl FaqVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Compact => "compact",
        }
    }
}

impl std::fmt::Display for FaqVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FaqVariant {
    type Err = PagesmithError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "compact" => Ok(Self::Compact),
            other => Err(PagesmithError::config(format!(
                "unknown FAQ variant '{other}': expected 'basic' or 'compact'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Product page
// ---------------------------------------------------------------------------

/// Headline block of the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductHero {
    pub title: String,
    pub subtitle: String,
    pub price: String,
}

/// Everything from the product except its name and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub concentration: String,
    pub skin_types: Vec<String>,
    pub key_ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub how_to_use: String,
    pub side_effects: String,
}

/// The `product_page.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub product_name: String,
    pub hero: ProductHero,
    pub details: ProductDetails,
}

// ---------------------------------------------------------------------------
// Comparison page
// ---------------------------------------------------------------------------

/// The subset of a product shown side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub name: String,
    pub concentration: String,
    pub skin_types: Vec<String>,
    pub key_ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub price: String,
}

impl From<&Product> for ComparisonSummary {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            concentration: p.concentration.clone(),
            skin_types: p.skin_types.clone(),
            key_ingredients: p.key_ingredients.clone(),
            benefits: p.benefits.clone(),
            price: p.price.clone(),
        }
    }
}

/// The two compared products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonProducts {
    pub a: ComparisonSummary,
    pub b: ComparisonSummary,
}

/// A single compared aspect with display values for both products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPoint {
    pub aspect: String,
    pub product_a: String,
    pub product_b: String,
}

/// The `comparison_page.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPage {
    pub title: String,
    pub products: ComparisonProducts,
    pub comparison_points: Vec<ComparisonPoint>,
}

// ---------------------------------------------------------------------------
// OutputManifest
// ---------------------------------------------------------------------------

/// Checksum record for one written page document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub filename: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// The `manifest.json` written next to the page documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputManifest {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    pub run_id: RunId,
    pub product_name: String,
    /// Tool version that produced the output.
    pub tool_version: String,
    /// Id of the FAQ template definition that was applied.
    pub faq_template: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glowboost() -> Product {
        Product {
            name: "GlowBoost".into(),
            concentration: "10% Vitamin C".into(),
            skin_types: vec!["Oily".into(), "Combination".into()],
            key_ingredients: vec!["Vitamin C".into(), "Hyaluronic Acid".into()],
            benefits: vec!["Brightening".into(), "Hydration".into()],
            how_to_use: "Apply 3 drops every morning".into(),
            side_effects: "Mild tingling".into(),
            price: "₹599".into(),
        }
    }

    #[test]
    fn run_id_roundtrip() {
        let id = RunId::new();
        let parsed: RunId = id.to_string().parse().expect("parse RunId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn raw_record_uses_source_field_names() {
        let json = r#"{
            "Product Name": "GlowBoost",
            "Concentration": "10% Vitamin C",
            "Skin Type": "Oily, Combination",
            "Key Ingredients": "Vitamin C, Hyaluronic Acid",
            "Benefits": "Brightening, Hydration",
            "How to Use": "Apply 3 drops every morning",
            "Side Effects": "Mild tingling",
            "Price": "₹599"
        }"#;
        let raw: RawProductRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(raw.product_name, "GlowBoost");
        assert_eq!(raw.skin_type, "Oily, Combination");
        assert_eq!(raw.price, "₹599");
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&QuestionCategory::Informational).expect("serialize");
        assert_eq!(json, "\"informational\"");
        assert_eq!(QuestionCategory::Purchase.to_string(), "purchase");
    }

    #[test]
    fn faq_variant_parsing() {
        assert_eq!("basic".parse::<FaqVariant>().unwrap(), FaqVariant::Basic);
        assert_eq!(" Compact ".parse::<FaqVariant>().unwrap(), FaqVariant::Compact);
        assert!("dense".parse::<FaqVariant>().is_err());
        assert_eq!(FaqVariant::default(), FaqVariant::Basic);
    }

    #[test]
    fn page_documents_use_camel_case_keys() {
        let product = glowboost();
        let page = ComparisonPage {
            title: "GlowBoost vs Other".into(),
            products: ComparisonProducts {
                a: ComparisonSummary::from(&product),
                b: ComparisonSummary::from(&product),
            },
            comparison_points: vec![ComparisonPoint {
                aspect: "Price".into(),
                product_a: "₹599".into(),
                product_b: "₹799".into(),
            }],
        };

        let value = serde_json::to_value(&page).expect("serialize");
        assert!(value.get("comparisonPoints").is_some());
        assert_eq!(value["comparisonPoints"][0]["productA"], "₹599");
        assert!(value["products"]["a"].get("skinTypes").is_some());
        assert!(value["products"]["a"].get("keyIngredients").is_some());
    }

    #[test]
    fn manifest_serialization() {
        let manifest = OutputManifest {
            schema_version: CURRENT_SCHEMA_VERSION,
            run_id: RunId::new(),
            product_name: "GlowBoost".into(),
            tool_version: "0.1.0".into(),
            faq_template: "faq-basic-v1".into(),
            created_at: Utc::now(),
            artifacts: vec![],
        };

        let json = serde_json::to_string_pretty(&manifest).expect("serialize");
        let parsed: OutputManifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(parsed.product_name, "GlowBoost");
        assert!(parsed.artifacts.is_empty());
    }

    #[test]
    fn product_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/product.fixture.json")
            .expect("read fixture");
        let raw: RawProductRecord =
            serde_json::from_str(&fixture).expect("deserialize fixture record");
        assert_eq!(raw.product_name, "GlowBoost");
        assert_eq!(raw.key_ingredients, "Vitamin C, Hyaluronic Acid");
    }
}
