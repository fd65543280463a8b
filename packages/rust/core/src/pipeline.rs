//! End-to-end generation: record → product → questions → pages → output.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use pagesmith_shared::{
    ComparisonPage, FaqPage, FaqVariant, OutputConfig, ProductPage, RawProductRecord, Result,
    RunId,
};

use crate::loader::{JsonFileLoader, ProductLoader};
use crate::normalizer::normalize;
use crate::pages::{build_comparison_page, build_faq_page, build_product_page};
use crate::questions::synthesize;
use crate::writer::{JsonDirWriter, PagePersister, PersistReport};

/// The three documents produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPages {
    pub faq_page: FaqPage,
    pub product_page: ProductPage,
    pub comparison_page: ComparisonPage,
    /// Variant the FAQ page was built with.
    pub faq_variant: FaqVariant,
}

/// Configuration for the file-based [`generate`] entry point.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Product record to read.
    pub input_path: PathBuf,
    /// Directory to write the pages into.
    pub output_dir: PathBuf,
    /// FAQ variant (basic when `None`).
    pub faq_variant: Option<FaqVariant>,
    /// Output file names and manifest switch.
    pub output: OutputConfig,
    /// Tool version string recorded in the manifest.
    pub tool_version: String,
}

/// Result of a full run.
#[derive(Debug)]
pub struct RunOutcome {
    pub pages: GeneratedPages,
    pub report: PersistReport,
    pub question_count: usize,
    pub elapsed: std::time::Duration,
}

impl RunOutcome {
    pub fn run_id(&self) -> &RunId {
        &self.report.run_id
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each page document is built.
    fn page_built(&self, page: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, outcome: &RunOutcome);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_built(&self, _page: &str, _current: usize, _total: usize) {}
    fn done(&self, _outcome: &RunOutcome) {}
}

/// Transform one raw record into the three page documents.
///
/// Synchronous and infallible; the FAQ uses the basic variant unless told otherwise.
#[instrument(skip_all, fields(name = %raw.product_name))]
pub fn execute(raw: &RawProductRecord, variant: Option<FaqVariant>) -> GeneratedPages {
    execute_with_progress(raw, variant.unwrap_or_default(), &SilentProgress)
}

fn execute_with_progress(
    raw: &RawProductRecord,
    faq_variant: FaqVariant,
    progress: &dyn ProgressReporter,
) -> GeneratedPages {
    progress.phase("Normalizing product");
    let product = normalize(raw);

    progress.phase("Generating questions");
    let questions = synthesize(&product);

    progress.phase("Building pages");
    let faq_page = build_faq_page(&product, &questions, faq_variant);
    progress.page_built("faq", 1, 3);
    let product_page = build_product_page(&product);
    progress.page_built("product", 2, 3);
    let comparison_page = build_comparison_page(&product);
    progress.page_built("comparison", 3, 3);

    GeneratedPages {
        faq_page,
        product_page,
        comparison_page,
        faq_variant,
    }
}

/// Load, transform, and persist.
///
/// Loader and persister errors propagate unchanged; nothing is persisted if
/// loading fails.
#[instrument(skip_all, fields(source = %loader.describe()))]
pub async fn run<L, P>(
    loader: &L,
    persister: &P,
    variant: Option<FaqVariant>,
    progress: &dyn ProgressReporter,
) -> Result<RunOutcome>
where
    L: ProductLoader,
    P: PagePersister,
{
    let start = Instant::now();
    let faq_variant = variant.unwrap_or_default();

    info!(variant = %faq_variant, "starting generation");

    progress.phase("Loading product record");
    let raw = loader.load().await?;

    let pages = execute_with_progress(&raw, faq_variant, progress);
    let question_count = pages.faq_page.item_count();

    progress.phase("Writing pages");
    let report = persister.persist(&pages).await?;

    let outcome = RunOutcome {
        pages,
        report,
        question_count,
        elapsed: start.elapsed(),
    };

    progress.done(&outcome);

    info!(
        run_id = %outcome.report.run_id,
        questions = outcome.question_count,
        output_dir = %outcome.report.output_dir.display(),
        elapsed_ms = outcome.elapsed.as_millis(),
        "generation complete"
    );

    Ok(outcome)
}

/// Run the pipeline with a JSON file loader and a directory writer.
pub async fn generate(
    config: &GenerateConfig,
    progress: &dyn ProgressReporter,
) -> Result<RunOutcome> {
    let loader = JsonFileLoader::new(&config.input_path);
    let writer = JsonDirWriter::new(&config.output_dir, &config.tool_version)
        .with_output(config.output.clone());

    run(&loader, &writer, config.faq_variant, progress).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::loader::InMemoryLoader;
    use pagesmith_shared::{PagesmithError, QuestionCategory};

    fn glowboost_raw() -> RawProductRecord {
        RawProductRecord {
            product_name: "GlowBoost".into(),
            concentration: "10% Vitamin C".into(),
            skin_type: "Oily, Combination".into(),
            key_ingredients: "Vitamin C, Hyaluronic Acid".into(),
            benefits: "Brightening, Hydration".into(),
            how_to_use: "Apply 3 drops every morning".into(),
            side_effects: "Mild tingling".into(),
            price: "₹599".into(),
        }
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pagesmith-pipeline-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Records phases so ordering can be asserted.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn phase(&self, name: &str) {
            self.events.lock().unwrap().push(name.to_string());
        }
        fn page_built(&self, page: &str, current: usize, total: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{page} {current}/{total}"));
        }
        fn done(&self, _outcome: &RunOutcome) {
            self.events.lock().unwrap().push("done".into());
        }
    }

    /// A persister that always fails.
    struct FailingPersister;

    impl PagePersister for FailingPersister {
        async fn persist(&self, _pages: &GeneratedPages) -> Result<PersistReport> {
            Err(PagesmithError::io(
                "/unwritable",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }
    }

    #[test]
    fn execute_builds_all_three_pages() {
        let pages = execute(&glowboost_raw(), None);
        assert_eq!(pages.faq_variant, FaqVariant::Basic);
        assert_eq!(pages.faq_page.sections[0].category, QuestionCategory::Informational);
        assert_eq!(pages.faq_page.item_count(), 28);
        assert_eq!(
            pages.product_page.hero.subtitle,
            "10% Vitamin C | For Oily, Combination skin"
        );
        assert_eq!(
            pages.comparison_page.title,
            "GlowBoost vs RadiantShield Brightening Serum"
        );
    }

    #[test]
    fn execute_is_deterministic() {
        let raw = glowboost_raw();
        assert_eq!(execute(&raw, None), execute(&raw, Some(FaqVariant::Basic)));
    }

    #[tokio::test]
    async fn run_writes_pages_and_reports_progress() {
        let tmp = temp_dir();
        let loader = InMemoryLoader::new(glowboost_raw());
        let writer = JsonDirWriter::new(&tmp, "0.1.0-test");
        let progress = RecordingProgress::default();

        let outcome = run(&loader, &writer, None, &progress).await.unwrap();

        assert_eq!(outcome.question_count, 28);
        assert_eq!(outcome.report.artifacts.len(), 3);
        assert!(tmp.join("comparison_page.json").exists());

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events.first().map(String::as_str), Some("Loading product record"));
        assert_eq!(events.last().map(String::as_str), Some("done"));
        assert!(events.contains(&"comparison 3/3".to_string()));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn persister_failure_propagates() {
        let loader = InMemoryLoader::new(glowboost_raw());
        let err = run(&loader, &FailingPersister, None, &SilentProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, PagesmithError::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }

    #[tokio::test]
    async fn malformed_input_writes_nothing() {
        let tmp = temp_dir();
        let out = tmp.join("output");
        let config = GenerateConfig {
            input_path: "../../../fixtures/json/malformed.fixture.json".into(),
            output_dir: out.clone(),
            faq_variant: None,
            output: OutputConfig::default(),
            tool_version: "0.1.0-test".into(),
        };

        let err = generate(&config, &SilentProgress).await.unwrap_err();
        assert!(matches!(err, PagesmithError::MalformedInput { .. }));
        assert!(!out.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn generate_from_fixture() {
        let tmp = temp_dir();
        let config = GenerateConfig {
            input_path: "../../../fixtures/json/product.fixture.json".into(),
            output_dir: tmp.clone(),
            faq_variant: Some(FaqVariant::Compact),
            output: OutputConfig::default(),
            tool_version: "0.1.0-test".into(),
        };

        let outcome = generate(&config, &SilentProgress).await.unwrap();
        assert_eq!(outcome.pages.faq_variant, FaqVariant::Compact);
        assert_eq!(outcome.pages.product_page.product_name, "GlowBoost");
        assert!(crate::writer::verify_output(&tmp).is_ok());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
