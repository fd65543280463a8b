//! Static template definitions describing page documents.
//!
//! A template is descriptive metadata: its fields and rules document the shape
//! of a page, they do not drive content generation.

use serde::Serialize;

/// Which page a template describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Faq,
    Product,
    Comparison,
}

/// Declared type of a template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemplateFieldType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "string[]")]
    StringList,
    #[serde(rename = "qa[]")]
    QaList,
    #[serde(rename = "comparison[]")]
    ComparisonList,
}

/// A field a rendered page is expected to carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: TemplateFieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// Rendering hints attached to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_questions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_category: Option<bool>,
}

/// A named page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    /// Stable discriminator, e.g. `faq-basic-v1`.
    pub id: &'static str,
    pub name: &'static str,
    pub page_type: PageType,
    pub fields: &'static [TemplateField],
    pub rules: TemplateRules,
    /// Content blocks the page is built from.
    pub required_blocks: &'static [&'static str],
}

impl TemplateDefinition {
    /// Names of the fields marked as required.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }
}
