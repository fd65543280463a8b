//! Built-in FAQ template definitions.

use pagesmith_shared::{
    FaqVariant, PageType, TemplateDefinition, TemplateField, TemplateFieldType, TemplateRules,
};

const FAQ_FIELDS: &[TemplateField] = &[
    TemplateField {
        name: "productName",
        field_type: TemplateFieldType::String,
        required: true,
        description: None,
    },
    TemplateField {
        name: "sections",
        field_type: TemplateFieldType::QaList,
        required: true,
        description: None,
    },
];

const FAQ_BLOCKS: &[&str] = &["generateQuestionsBlock", "buildFAQItemsBlock"];

/// `faq-basic-v1`: grouped by category, at least five questions.
pub static FAQ_BASIC: TemplateDefinition = TemplateDefinition {
    id: "faq-basic-v1",
    name: "Basic FAQ Template",
    page_type: PageType::Faq,
    fields: FAQ_FIELDS,
    rules: TemplateRules {
        min_questions: Some(5),
        group_by_category: Some(true),
    },
    required_blocks: FAQ_BLOCKS,
};

/// `faq-compact-v1`: same fields, no rules; every question is kept.
pub static FAQ_COMPACT: TemplateDefinition = TemplateDefinition {
    id: "faq-compact-v1",
    name: "Compact FAQ Template",
    page_type: PageType::Faq,
    fields: FAQ_FIELDS,
    rules: TemplateRules {
        min_questions: None,
        group_by_category: None,
    },
    required_blocks: FAQ_BLOCKS,
};

/// The template definition behind a variant.
pub fn faq_template(variant: FaqVariant) -> &'static TemplateDefinition {
    match variant {
        FaqVariant::Basic => &FAQ_BASIC,
        FaqVariant::Compact => &FAQ_COMPACT,
    }
}
