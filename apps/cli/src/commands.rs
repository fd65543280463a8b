//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use pagesmith_core::pipeline::{GenerateConfig, ProgressReporter, RunOutcome};
use pagesmith_core::{loader::ProductLoader, normalizer, questions};
use pagesmith_shared::{AppConfig, FaqVariant, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Pagesmith: turn a product record into FAQ, product, and comparison pages.
#[derive(Parser)]
#[command(
    name = "pagesmith",
    version,
    about = "Generate FAQ, product detail, and comparison pages from a product record.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.pagesmith/pagesmith.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// FAQ variant flag.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum VariantArg {
    Basic,
    Compact,
}

impl From<VariantArg> for FaqVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Basic => FaqVariant::Basic,
            VariantArg::Compact => FaqVariant::Compact,
        }
    }
}

/// Document printed by `preview`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum PreviewPage {
    Faq,
    Product,
    Comparison,
    Questions,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate all pages and write them to the output directory.
    Generate {
        /// Product record JSON file.
        #[arg(short, long)]
        input: Option<String>,

        /// Output directory.
        #[arg(short, long)]
        out: Option<String>,

        /// FAQ template variant.
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
    },

    /// Print one generated document to stdout without writing files.
    Preview {
        /// Product record JSON file.
        #[arg(short, long)]
        input: Option<String>,

        /// Which document to print.
        #[arg(short, long, value_enum, default_value = "faq")]
        page: PreviewPage,

        /// FAQ template variant.
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
    },

    /// Check an output directory against its manifest.
    Verify {
        /// Output directory.
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = format!("pagesmith={level},pagesmith_core={level},pagesmith_shared={level}");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate {
            input,
            out,
            variant,
        } => cmd_generate(&config, input.as_deref(), out.as_deref(), variant).await,
        Command::Preview {
            input,
            page,
            variant,
        } => cmd_preview(&config, input.as_deref(), page, variant).await,
        Command::Verify { out } => cmd_verify(&config, out.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn pick_variant(config: &AppConfig, flag: Option<VariantArg>) -> FaqVariant {
    flag.map(FaqVariant::from)
        .unwrap_or(config.defaults.faq_variant)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_generate(
    config: &AppConfig,
    input: Option<&str>,
    out: Option<&str>,
    variant: Option<VariantArg>,
) -> Result<()> {
    let faq_variant = pick_variant(config, variant);

    let generate_config = GenerateConfig {
        input_path: PathBuf::from(input.unwrap_or(&config.defaults.input_path)),
        output_dir: PathBuf::from(out.unwrap_or(&config.defaults.output_dir)),
        faq_variant: Some(faq_variant),
        output: config.output.clone(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    info!(
        input = %generate_config.input_path.display(),
        out = %generate_config.output_dir.display(),
        variant = %faq_variant,
        "generating pages"
    );

    let reporter = CliProgress::new();
    let outcome = pagesmith_core::generate(&generate_config, &reporter).await?;

    println!();
    println!("  Pages generated successfully!");
    println!("  Run:       {}", outcome.run_id());
    println!("  Product:   {}", outcome.pages.faq_page.product_name);
    println!("  Questions: {}", outcome.question_count);
    println!("  Template:  {}", pagesmith_core::templates::faq_template(faq_variant).id);
    println!("  Path:      {}", outcome.report.output_dir.display());
    for artifact in &outcome.report.artifacts {
        println!("             {} ({} bytes)", artifact.filename, artifact.size_bytes);
    }
    println!(
        "  Time:      {:.1}ms",
        outcome.elapsed.as_secs_f64() * 1000.0
    );
    println!();

    Ok(())
}

async fn cmd_preview(
    config: &AppConfig,
    input: Option<&str>,
    page: PreviewPage,
    variant: Option<VariantArg>,
) -> Result<()> {
    let path = input.unwrap_or(&config.defaults.input_path);
    let raw = pagesmith_core::loader::JsonFileLoader::new(path)
        .load()
        .await?;

    let json = if let PreviewPage::Questions = page {
        let product = normalizer::normalize(&raw);
        serde_json::to_string_pretty(&questions::synthesize(&product))?
    } else {
        let pages = pagesmith_core::execute(&raw, Some(pick_variant(config, variant)));
        match page {
            PreviewPage::Product => serde_json::to_string_pretty(&pages.product_page)?,
            PreviewPage::Comparison => serde_json::to_string_pretty(&pages.comparison_page)?,
            _ => serde_json::to_string_pretty(&pages.faq_page)?,
        }
    };

    println!("{json}");
    Ok(())
}

fn cmd_verify(config: &AppConfig, out: Option<&str>) -> Result<()> {
    let dir = PathBuf::from(out.unwrap_or(&config.defaults.output_dir));
    if !dir.is_dir() {
        return Err(eyre!("output directory '{}' does not exist", dir.display()));
    }

    let manifest = pagesmith_core::writer::verify_output(&dir)?;

    println!("  Output verified: {}", dir.display());
    println!("  Run:      {}", manifest.run_id);
    println!("  Product:  {}", manifest.product_name);
    println!("  Template: {}", manifest.faq_template);
    println!("  Files:    {}", manifest.artifacts.len());
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_built(&self, page: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Built [{current}/{total}] {page} page"));
    }

    fn done(&self, _outcome: &RunOutcome) {
        self.spinner.finish_and_clear();
    }
}
