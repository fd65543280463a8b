//! Content generation pipeline for Pagesmith.
//!
//! Turns one raw product record into an FAQ page, a product detail page, and a
//! comparison page:
//! - [`normalizer`]: raw record → [`pagesmith_shared::Product`]
//! - [`questions`]: fixed question catalog
//! - [`answers`]: ordered answer rules
//! - [`pages`]: page assemblers
//! - [`pipeline`]: end-to-end run with a [`loader`] and a [`writer`]

pub mod answers;
pub mod loader;
pub mod normalizer;
pub mod pages;
pub mod pipeline;
pub mod questions;
pub mod templates;
pub mod writer;

pub use pipeline::{GenerateConfig, GeneratedPages, RunOutcome, execute, generate, run};
