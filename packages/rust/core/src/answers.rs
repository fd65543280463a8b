//! Rule-based answer resolution.
//!
//! [`RULES`] is one flat, ordered table. A question is lowercased and trimmed,
//! then checked against each rule in turn; the first match wins. The
//! question's own category is never consulted, so a rule listed under one
//! category block can answer a question from another.
//!
//! Answer templates use `{placeholder}` slots filled from the product:
//! `name`, `concentration`, `skin_types`, `ingredients`, `benefits`,
//! `how_to_use`, `side_effects`, `price`. List fields are joined with `", "`.

use tracing::trace;

use pagesmith_shared::{Product, UserQuestion};

/// How a rule recognises a question (applied to the lowercased, trimmed text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// The text is exactly `what is <product name>`, with at most one trailing `?`.
    WhatIsProduct,
    StartsWith(&'static str),
    Contains(&'static str),
    ContainsAny(&'static [&'static str]),
    StartsWithOrContains {
        prefix: &'static str,
        needle: &'static str,
    },
}

impl Matcher {
    /// `text` must already be lowercased and trimmed; so must `product_name`.
    pub fn matches(&self, text: &str, product_name: &str) -> bool {
        match self {
            Self::WhatIsProduct => text.strip_prefix("what is ").is_some_and(|rest| {
                rest.trim() == product_name
                    || rest.strip_suffix('?').is_some_and(|r| r.trim() == product_name)
            }),
            Self::StartsWith(prefix) => text.starts_with(prefix),
            Self::Contains(needle) => text.contains(needle),
            Self::ContainsAny(needles) => needles.iter().any(|n| text.contains(n)),
            Self::StartsWithOrContains { prefix, needle } => {
                text.starts_with(prefix) || text.contains(needle)
            }
        }
    }
}

/// One entry of the answer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRule {
    /// Stable name used in logs and tests.
    pub id: &'static str,
    pub matcher: Matcher,
    pub template: &'static str,
}

const fn rule(id: &'static str, matcher: Matcher, template: &'static str) -> AnswerRule {
    AnswerRule {
        id,
        matcher,
        template,
    }
}

/// Ordered answer rules. Order is significant.
pub const RULES: [AnswerRule; 18] = [
    // Informational
    rule(
        "what_is_product",
        Matcher::WhatIsProduct,
        "{name} is a skincare serum with {concentration}, designed for {skin_types} skin and formulated with key ingredients like {ingredients}.",
    ),
    rule(
        "key_ingredients",
        Matcher::Contains("key ingredients"),
        "{name} contains key ingredients including {ingredients}.",
    ),
    rule(
        "main_benefits",
        Matcher::Contains("main benefits"),
        "The main benefits of {name} are: {benefits}.",
    ),
    rule(
        "skin_types",
        Matcher::Contains("which skin types"),
        "{name} is suitable for {skin_types} skin.",
    ),
    rule(
        "concentration_in",
        Matcher::ContainsAny(&["vitamin c concentration", "concentration in"]),
        "{name} has a Vitamin C concentration of {concentration}.",
    ),
    rule(
        "concentration_of",
        Matcher::Contains("concentration of"),
        "{name} contains {concentration}.",
    ),
    // Usage
    rule(
        "how_to_use",
        Matcher::StartsWithOrContains {
            prefix: "how should i use",
            needle: "in my routine",
        },
        "To use {name}, follow these instructions: {how_to_use}.",
    ),
    rule(
        "time_of_day",
        Matcher::Contains("when during the day"),
        "{name} is described as a morning-use serum. The usage instructions say: {how_to_use}.",
    ),
    rule(
        "drops",
        Matcher::Contains("how many drops"),
        "Use 2–3 drops, as stated in the instructions: {how_to_use}.",
    ),
    rule(
        "sunscreen",
        Matcher::Contains("sunscreen"),
        "Yes, {name} is meant to be applied in the morning before sunscreen. The usage directions are: {how_to_use}.",
    ),
    rule(
        "daily_use",
        Matcher::Contains("daily-use"),
        "{name} is described for use in the morning routine. The label states: {how_to_use}.",
    ),
    // Safety
    rule(
        "side_effects",
        Matcher::Contains("side effects"),
        "The product notes the following possible side effect: {side_effects}.",
    ),
    rule(
        "sensitive_skin",
        Matcher::Contains("sensitive skin"),
        "The product specifically mentions: {side_effects}. This means people with sensitive skin may experience mild tingling when using {name}.",
    ),
    rule(
        "tingling",
        Matcher::Contains("what should i do if i feel tingling"),
        "The product information states: {side_effects}. This indicates that mild tingling can occur, especially on sensitive skin, when using {name}.",
    ),
    // Purchase
    rule(
        "price",
        Matcher::Contains("price of"),
        "The listed price of {name} is {price}.",
    ),
    // Comparison
    rule(
        "compare_vitamin_c",
        Matcher::Contains("compare to another vitamin c serum"),
        "{name} is a {concentration} serum with ingredients like {ingredients}. Other Vitamin C serums may differ in concentration, ingredients, and price, but only this product’s details are provided here.",
    ),
    rule(
        "compare_other_serums",
        Matcher::Contains("compare to other serums"),
        "{name} offers {concentration}. Other serums can use higher or lower percentages or different ingredient combinations, but only {name} is described in the available data.",
    ),
    // Unreachable while `concentration_of` precedes it.
    rule(
        "compare_concentration",
        Matcher::Contains("how does the concentration of"),
        "{name} has a concentration of {concentration}. We do not have specific concentration details for other serums in this dataset.",
    ),
];

/// Answer used when no rule matches.
pub const FALLBACK_TEMPLATE: &str = "{name} is a serum with {concentration}, suitable for {skin_types} skin, offering benefits such as {benefits}, and containing ingredients like {ingredients}.";

/// Resolve the answer for one question. Never fails, never returns empty text.
pub fn resolve(product: &Product, question: &UserQuestion) -> String {
    resolve_text(product, &question.question)
}

/// Resolve the answer for free-form question text.
pub fn resolve_text(product: &Product, question: &str) -> String {
    let slots = Slots::new(product);
    let template = match matching_rule(product, question) {
        Some(rule) => {
            trace!(rule = rule.id, question, "answer rule matched");
            rule.template
        }
        None => {
            trace!(question, "no answer rule matched, using fallback");
            FALLBACK_TEMPLATE
        }
    };
    interpolate(template, &slots)
}

/// The first rule matching `question`, if any.
pub fn matching_rule(product: &Product, question: &str) -> Option<&'static AnswerRule> {
    let text = question.trim().to_lowercase();
    let name = product.name.trim().to_lowercase();
    RULES.iter().find(|rule| rule.matcher.matches(&text, &name))
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Display values for every template slot.
struct Slots<'a> {
    product: &'a Product,
    skin_types: String,
    ingredients: String,
    benefits: String,
}

impl<'a> Slots<'a> {
    fn new(product: &'a Product) -> Self {
        Self {
            product,
            skin_types: product.skin_types.join(", "),
            ingredients: product.key_ingredients.join(", "),
            benefits: product.benefits.join(", "),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.product.name,
            "concentration" => &self.product.concentration,
            "skin_types" => &self.skin_types,
            "ingredients" => &self.ingredients,
            "benefits" => &self.benefits,
            "how_to_use" => &self.product.how_to_use,
            "side_effects" => &self.product.side_effects,
            "price" => &self.product.price,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Single-pass slot substitution. Inserted values are never re-scanned, and
/// unknown slots are kept verbatim.
fn interpolate(template: &str, slots: &Slots<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match slots.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
