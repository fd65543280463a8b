//! Application configuration for Pagesmith.
//!
//! User config lives at `~/.pagesmith/pagesmith.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PagesmithError, Result};
use crate::types::FaqVariant;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "pagesmith.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".pagesmith";

// ---------------------------------------------------------------------------
// Config structs (matching pagesmith.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Output file naming.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Product record to read when `--input` is not given.
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Directory the page documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// FAQ variant used when `--variant` is not given.
    #[serde(default)]
    pub faq_variant: FaqVariant,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_dir: default_output_dir(),
            faq_variant: FaqVariant::default(),
        }
    }
}

fn default_input_path() -> String {
    "data/product.json".into()
}
fn default_output_dir() -> String {
    "output".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_faq_file")]
    pub faq_file: String,

    #[serde(default = "default_product_file")]
    pub product_file: String,

    #[serde(default = "default_comparison_file")]
    pub comparison_file: String,

    /// Whether to write `manifest.json` with checksums next to the pages.
    #[serde(default = "default_true")]
    pub write_manifest: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            faq_file: default_faq_file(),
            product_file: default_product_file(),
            comparison_file: default_comparison_file(),
            write_manifest: true,
        }
    }
}

fn default_faq_file() -> String {
    "faq.json".into()
}
fn default_product_file() -> String {
    "product_page.json".into()
}
fn default_comparison_file() -> String {
    "comparison_page.json".into()
}
fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.pagesmith/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PagesmithError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.pagesmith/pagesmith.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PagesmithError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        PagesmithError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PagesmithError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PagesmithError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PagesmithError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that output file names are plain, non-empty, and distinct.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let names = [
        ("faq_file", &config.output.faq_file),
        ("product_file", &config.output.product_file),
        ("comparison_file", &config.output.comparison_file),
    ];

    for (key, name) in names {
        if name.trim().is_empty() {
            return Err(PagesmithError::config(format!("output.{key} must not be empty")));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(PagesmithError::config(format!(
                "output.{key} must be a file name, not a path: '{name}'"
            )));
        }
        if name == "manifest.json" {
            return Err(PagesmithError::config(format!(
                "output.{key} collides with manifest.json"
            )));
        }
    }

    for (i, (key_a, a)) in names.iter().enumerate() {
        for (key_b, b) in &names[i + 1..] {
            if a == b {
                return Err(PagesmithError::config(format!(
                    "output.{key_a} and output.{key_b} are both '{a}'"
                )));
            }
        }
    }

    Ok(())
}
