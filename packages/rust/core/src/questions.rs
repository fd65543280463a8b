//! Fixed question catalog.
//!
//! The catalog is a static, ordered table of templates. Position in the table
//! decides both the question id (`<category>_<position>`, 1-based, counted
//! across the whole catalog) and, through first occurrence, the order of the
//! FAQ sections.

use std::collections::HashMap;

use tracing::{debug, instrument};

use pagesmith_shared::{Product, QuestionCategory, UserQuestion};

use QuestionCategory::{Comparison, Informational, Purchase, Safety, Usage};

/// Placeholder replaced with the product name.
const NAME: &str = "{name}";

/// Ordered question templates.
pub const CATALOG: [(QuestionCategory, &str); 28] = [
    // Core blocks
    (Informational, "What is {name}?"),
    (Informational, "What are the key ingredients in {name}?"),
    (Informational, "What are the main benefits of using {name}?"),
    (Informational, "Which skin types is {name} suitable for?"),
    (Usage, "How should I use {name} in my routine?"),
    (Usage, "When during the day should I apply {name}?"),
    (Usage, "How many drops of {name} should I use at a time?"),
    (Usage, "Should I apply sunscreen after using {name}?"),
    (Safety, "Are there any side effects of using {name}?"),
    (Safety, "Is {name} suitable for sensitive skin?"),
    (Safety, "What should I do if I feel tingling after applying {name}?"),
    (Purchase, "What is the price of {name}?"),
    (Purchase, "Is {name} a daily-use product or occasional treatment?"),
    (Comparison, "How does {name} compare to another Vitamin C serum?"),
    (Comparison, "How does the concentration of {name} compare to other serums?"),
    // Continued
    (Informational, "What is the Vitamin C concentration in {name}?"),
    (Informational, "How long does it take to see results with {name}?"),
    (Informational, "What is the shelf life of {name} after opening?"),
    (Usage, "Can I use {name} with other active ingredients like retinol or AHAs?"),
    (Usage, "Do I need to shake {name} before use?"),
    (Safety, "Can I use {name} during pregnancy or while breastfeeding?"),
    (Safety, "What should I do if {name} gets into my eyes?"),
    (Purchase, "What size options are available for {name}?"),
    (Purchase, "Is there a money-back guarantee for {name}?"),
    // Additional
    (Informational, "How should I store {name} to maintain its potency?"),
    (Informational, "Does {name} need to be refrigerated?"),
    (Usage, "What visible changes can I expect from using {name}?"),
    (Comparison, "What makes {name} different from other serums on the market?"),
];

/// Generate the full question list for a product.
///
/// Only the product name is read; every other field leaves the output unchanged.
#[instrument(skip_all, fields(name = %product.name))]
pub fn synthesize(product: &Product) -> Vec<UserQuestion> {
    let questions: Vec<UserQuestion> = CATALOG
        .iter()
        .enumerate()
        .map(|(index, (category, template))| UserQuestion {
            id: question_id(*category, index + 1),
            category: *category,
            question: template.replace(NAME, &product.name),
        })
        .collect();

    debug!(count = questions.len(), "questions synthesized");
    questions
}

/// Build a question id from its category and 1-based catalog position.
pub fn question_id(category: QuestionCategory, position: usize) -> String {
    format!("{}_{position}", category.as_str())
}

/// Number of questions per category.
pub fn category_counts(questions: &[UserQuestion]) -> HashMap<QuestionCategory, usize> {
    let mut counts = HashMap::new();
    for q in questions {
        *counts.entry(q.category).or_insert(0) += 1;
    }
    counts
}
