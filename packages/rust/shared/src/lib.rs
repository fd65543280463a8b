//! Shared types, error model, and configuration for Pagesmith.
//!
//! This crate is the foundation depended on by all other Pagesmith crates.
//! It provides:
//! - [`PagesmithError`]: the unified error type
//! - Domain types ([`RawProductRecord`], [`Product`], [`UserQuestion`], page documents)
//! - Template metadata ([`TemplateDefinition`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod template;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, OutputConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, validate_config,
};
pub use error::{PagesmithError, Result};
pub use template::{PageType, TemplateDefinition, TemplateField, TemplateFieldType, TemplateRules};
pub use types::{
    ArtifactMeta, CURRENT_SCHEMA_VERSION, ComparisonPage, ComparisonPoint, ComparisonProducts,
    ComparisonSummary, FaqPage, FaqSection, FaqVariant, OutputManifest, Product, ProductDetails,
    ProductHero, ProductPage, QaItem, QuestionCategory, RawProductRecord, RunId, UserQuestion,
};
