//! Page assemblers: FAQ, product detail, and comparison.
//!
//! All three are pure functions of the normalized product (plus the question
//! list for the FAQ) and can be built in any order.

pub mod comparison;
pub mod faq;
pub mod product;

pub use comparison::{ComparisonAspect, build_comparison_page, competitor};
pub use faq::{
    BasicFaq, CompactFaq, FaqAssembler, assembler_for, build_faq_page, build_qa_items,
    group_by_category,
};
pub use product::build_product_page;
