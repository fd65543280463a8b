//! FAQ page assembly.
//!
//! Each question is answered through [`crate::answers::resolve`], the answers
//! are grouped by category in first-occurrence order, and the groups become
//! the page sections. The variant picks the [`FaqAssembler`] implementation.

use tracing::{debug, instrument};

use pagesmith_shared::{
    FaqPage, FaqSection, FaqVariant, Product, QaItem, TemplateDefinition, UserQuestion,
};

use crate::answers;
use crate::templates::{FAQ_BASIC, FAQ_COMPACT};

/// Builds an FAQ page for one template variant.
pub trait FaqAssembler: Send + Sync {
    /// The template this assembler renders.
    fn template(&self) -> &'static TemplateDefinition;

    /// Answer `questions` for `product` and lay them out as a page.
    fn assemble(&self, product: &Product, questions: &[UserQuestion]) -> FaqPage;
}

/// `faq-basic-v1`: every item, grouped by category.
pub struct BasicFaq;

impl FaqAssembler for BasicFaq {
    fn template(&self) -> &'static TemplateDefinition {
        &FAQ_BASIC
    }

    fn assemble(&self, product: &Product, questions: &[UserQuestion]) -> FaqPage {
        FaqPage {
            product_name: product.name.clone(),
            sections: group_by_category(build_qa_items(product, questions)),
        }
    }
}

/// `faq-compact-v1`: same layout as basic. No per-section limit is applied.
pub struct CompactFaq;

impl FaqAssembler for CompactFaq {
    fn template(&self) -> &'static TemplateDefinition {
        &FAQ_COMPACT
    }

    fn assemble(&self, product: &Product, questions: &[UserQuestion]) -> FaqPage {
        let sections = group_by_category(build_qa_items(product, questions));
        debug!(sections = sections.len(), "compact FAQ keeps all items");
        FaqPage {
            product_name: product.name.clone(),
            sections,
        }
    }
}

/// The assembler for a variant.
pub fn assembler_for(variant: FaqVariant) -> &'static dyn FaqAssembler {
    match variant {
        FaqVariant::Basic => &BasicFaq,
        FaqVariant::Compact => &CompactFaq,
    }
}

/// Build the FAQ page with the given variant.
#[instrument(skip_all, fields(name = %product.name, variant = %variant, questions = questions.len()))]
pub fn build_faq_page(
    product: &Product,
    questions: &[UserQuestion],
    variant: FaqVariant,
) -> FaqPage {
    let assembler = assembler_for(variant);
    let page = assembler.assemble(product, questions);
    debug!(
        template = assembler.template().id,
        sections = page.sections.len(),
        items = page.item_count(),
        "FAQ page assembled"
    );
    page
}

/// Answer every question, keeping catalog order.
pub fn build_qa_items(product: &Product, questions: &[UserQuestion]) -> Vec<QaItem> {
    questions
        .iter()
        .map(|q| QaItem {
            question: q.question.clone(),
            category: q.category,
            answer: answers::resolve(product, q),
        })
        .collect()
}

/// Group items by category. Sections appear in the order their category is
/// first seen; items keep their relative order.
pub fn group_by_category(items: Vec<QaItem>) -> Vec<FaqSection> {
    let mut sections: Vec<FaqSection> = Vec::new();

    for item in items {
        match sections.iter_mut().find(|s| s.category == item.category) {
            Some(section) => section.items.push(item),
            None => sections.push(FaqSection {
                category: item.category,
                items: vec![item],
            }),
        }
    }

    sections
}
