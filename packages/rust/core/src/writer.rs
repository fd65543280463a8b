//! Output directory writer.
//!
//! Writes the three page documents as pretty-printed JSON plus a
//! `manifest.json` with checksums:
//! ```text
//! <output_dir>/
//! ├── faq.json
//! ├── product_page.json
//! ├── comparison_page.json
//! └── manifest.json
//! ```
//! Every document, manifest included, is serialized before the first file is
//! touched. Files go through dot-prefixed temp files that are renamed into
//! place as one commit; a failed commit restores the previous output.

use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use pagesmith_shared::{
    ArtifactMeta, CURRENT_SCHEMA_VERSION, OutputConfig, OutputManifest, PagesmithError, Result,
    RunId,
};

use crate::pipeline::GeneratedPages;
use crate::templates::faq_template;

const MANIFEST_FILE: &str = "manifest.json";

/// What a persister reports back after a successful write.
#[derive(Debug, Clone)]
pub struct PersistReport {
    pub run_id: RunId,
    pub output_dir: PathBuf,
    /// Page documents in write order (FAQ, product, comparison).
    pub artifacts: Vec<ArtifactMeta>,
    pub manifest_path: Option<PathBuf>,
}

/// Durably stores the generated pages.
pub trait PagePersister: Send + Sync {
    fn persist(&self, pages: &GeneratedPages) -> impl Future<Output = Result<PersistReport>> + Send;
}

/// Writes pages into a directory on disk.
#[derive(Debug, Clone)]
pub struct JsonDirWriter {
    output_dir: PathBuf,
    output: OutputConfig,
    tool_version: String,
}

impl JsonDirWriter {
    pub fn new(output_dir: impl Into<PathBuf>, tool_version: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            output: OutputConfig::default(),
            tool_version: tool_version.into(),
        }
    }

    /// Override file names and the manifest switch.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
}

impl PagePersister for JsonDirWriter {
    #[instrument(skip_all, fields(output_dir = %self.output_dir.display()))]
    async fn persist(&self, pages: &GeneratedPages) -> Result<PersistReport> {
        let run_id = RunId::new();

        let mut documents = vec![
            (self.output.faq_file.as_str(), to_json(&pages.faq_page)?),
            (self.output.product_file.as_str(), to_json(&pages.product_page)?),
            (self.output.comparison_file.as_str(), to_json(&pages.comparison_page)?),
        ];

        let artifacts: Vec<ArtifactMeta> = documents
            .iter()
            .map(|(filename, content)| ArtifactMeta {
                filename: (*filename).to_string(),
                sha256: sha256_hex(content),
                size_bytes: content.len(),
            })
            .collect();

        // A manifest from an earlier run would describe the wrong files.
        let mut obsolete: Vec<&str> = Vec::new();
        if self.output.write_manifest {
            let manifest = OutputManifest {
                schema_version: CURRENT_SCHEMA_VERSION,
                run_id: run_id.clone(),
                product_name: pages.faq_page.product_name.clone(),
                tool_version: self.tool_version.clone(),
                faq_template: faq_template(pages.faq_variant).id.to_string(),
                created_at: Utc::now(),
                artifacts: artifacts.clone(),
            };
            documents.push((MANIFEST_FILE, to_json(&manifest)?));
        } else {
            obsolete.push(MANIFEST_FILE);
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| PagesmithError::io(&self.output_dir, e))?;

        write_all_atomic(&self.output_dir, &documents, &obsolete).await?;

        let manifest_path = self
            .output
            .write_manifest
            .then(|| self.output_dir.join(MANIFEST_FILE));

        info!(%run_id, files = artifacts.len(), "pages persisted");

        Ok(PersistReport {
            run_id,
            output_dir: self.output_dir.clone(),
            artifacts,
            manifest_path,
        })
    }
}

/// Check a written output directory against its `manifest.json`.
///
/// Every listed file must exist with the recorded size and SHA-256.
pub fn verify_output(output_dir: &Path) -> Result<OutputManifest> {
    let manifest_path = output_dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return Err(PagesmithError::validation("missing manifest.json"));
    }

    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| PagesmithError::io(&manifest_path, e))?;
    let manifest: OutputManifest = serde_json::from_str(&content)
        .map_err(|e| PagesmithError::validation(format!("invalid manifest.json: {e}")))?;

    if manifest.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(PagesmithError::validation(format!(
            "unsupported schema_version: {} (expected {})",
            manifest.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    for artifact in &manifest.artifacts {
        let path = output_dir.join(&artifact.filename);
        if !path.exists() {
            return Err(PagesmithError::validation(format!(
                "missing {}",
                artifact.filename
            )));
        }

        let bytes = std::fs::read(&path).map_err(|e| PagesmithError::io(&path, e))?;
        if bytes.len() != artifact.size_bytes {
            return Err(PagesmithError::validation(format!(
                "size mismatch for {}: {} bytes on disk, {} recorded",
                artifact.filename,
                bytes.len(),
                artifact.size_bytes
            )));
        }
        if sha256_hex(&bytes) != artifact.sha256 {
            return Err(PagesmithError::validation(format!(
                "checksum mismatch for {}",
                artifact.filename
            )));
        }
    }

    debug!(path = %output_dir.display(), files = manifest.artifacts.len(), "output verified");
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_json<T: serde::Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| PagesmithError::Serialization(format!("JSON serialization failed: {e}")))
}

fn sha256_hex(content: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    format!("{:x}", hasher.finalize())
}

fn temp_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(format!(".{filename}.tmp"))
}

fn backup_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(format!(".{filename}.bak"))
}

/// Write every `(filename, content)` pair to a temp file, then swap them all
/// into place together with the removal of `obsolete` files.
///
/// Existing targets are moved aside first. If any step fails, the new files
/// are removed, the previous ones restored, and temp files discarded.
async fn write_all_atomic(
    dir: &Path,
    documents: &[(&str, String)],
    obsolete: &[&str],
) -> Result<()> {
    let mut txn = Commit::new(dir);

    for (filename, content) in documents {
        let temp = temp_path(dir, filename);
        txn.temps.push(temp.clone());
        if let Err(e) = tokio::fs::write(&temp, content).await {
            txn.rollback().await;
            return Err(PagesmithError::io(&temp, e));
        }
    }

    for filename in obsolete {
        if let Err(e) = txn.set_aside(filename).await {
            txn.rollback().await;
            return Err(e);
        }
    }

    for (filename, _) in documents {
        if let Err(e) = txn.set_aside(filename).await {
            txn.rollback().await;
            return Err(e);
        }

        let target = dir.join(filename);
        if let Err(e) = tokio::fs::rename(temp_path(dir, filename), &target).await {
            txn.rollback().await;
            return Err(PagesmithError::io(&target, e));
        }
        txn.committed.push(target);
        debug!(file = %filename, "wrote document");
    }

    txn.finish().await;
    Ok(())
}

/// Bookkeeping for one [`write_all_atomic`] call.
struct Commit<'a> {
    dir: &'a Path,
    temps: Vec<PathBuf>,
    /// `(backup, original)` pairs in the order they were moved aside.
    backups: Vec<(PathBuf, PathBuf)>,
    committed: Vec<PathBuf>,
}

impl<'a> Commit<'a> {
    fn new(dir: &'a Path) -> Self {
        Self {
            dir,
            temps: Vec::new(),
            backups: Vec::new(),
            committed: Vec::new(),
        }
    }

    /// Move an existing regular file out of the way. Anything else at the
    /// path is left alone.
    async fn set_aside(&mut self, filename: &str) -> Result<()> {
        let target = self.dir.join(filename);
        match tokio::fs::symlink_metadata(&target).await {
            Ok(meta) if meta.is_file() => {
                let backup = backup_path(self.dir, filename);
                tokio::fs::rename(&target, &backup)
                    .await
                    .map_err(|e| PagesmithError::io(&target, e))?;
                self.backups.push((backup, target));
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PagesmithError::io(&target, e)),
        }
    }

    async fn rollback(self) {
        discard(&self.committed).await;
        for (backup, original) in self.backups.iter().rev() {
            if let Err(e) = tokio::fs::rename(backup, original).await {
                warn!(path = %original.display(), error = %e, "failed to restore previous file");
            }
        }
        discard(&self.temps).await;
    }

    async fn finish(self) {
        let backups: Vec<PathBuf> = self.backups.into_iter().map(|(backup, _)| backup).collect();
        discard(&backups).await;
    }
}

async fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to remove file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::execute;
    use pagesmith_shared::{FaqVariant, RawProductRecord};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pagesmith-writer-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

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

    #[tokio::test]
    async fn writes_all_documents_and_manifest() {
        let tmp = temp_dir();
        let out = tmp.join("output");
        let pages = execute(&glowboost_raw(), None);

        let report = JsonDirWriter::new(&out, "0.1.0-test")
            .persist(&pages)
            .await
            .unwrap();

        assert!(out.join("faq.json").exists());
        assert!(out.join("product_page.json").exists());
        assert!(out.join("comparison_page.json").exists());
        assert_eq!(report.manifest_path, Some(out.join("manifest.json")));
        assert_eq!(report.artifacts.len(), 3);
        assert_eq!(report.artifacts[0].filename, "faq.json");
        assert_eq!(report.artifacts[0].sha256.len(), 64);

        let faq: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("faq.json")).unwrap())
                .unwrap();
        assert_eq!(faq["productName"], "GlowBoost");
        assert_eq!(faq["sections"][0]["category"], "informational");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn manifest_records_template_and_run() {
        let tmp = temp_dir();
        let pages = execute(&glowboost_raw(), Some(FaqVariant::Compact));

        let report = JsonDirWriter::new(&tmp, "0.1.0-test")
            .persist(&pages)
            .await
            .unwrap();

        let manifest = verify_output(&tmp).unwrap();
        assert_eq!(manifest.faq_template, "faq-compact-v1");
        assert_eq!(manifest.product_name, "GlowBoost");
        assert_eq!(manifest.run_id, report.run_id);
        assert_eq!(manifest.artifacts, report.artifacts);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn custom_names_and_no_manifest() {
        let tmp = temp_dir();
        let pages = execute(&glowboost_raw(), None);
        let output = OutputConfig {
            faq_file: "questions.json".into(),
            product_file: "detail.json".into(),
            comparison_file: "versus.json".into(),
            write_manifest: false,
        };

        let report = JsonDirWriter::new(&tmp, "0.1.0-test")
            .with_output(output)
            .persist(&pages)
            .await
            .unwrap();

        assert!(tmp.join("questions.json").exists());
        assert!(tmp.join("versus.json").exists());
        assert!(!tmp.join("manifest.json").exists());
        assert!(report.manifest_path.is_none());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let tmp = temp_dir();
        let pages = execute(&glowboost_raw(), None);
        JsonDirWriter::new(&tmp, "0.1.0-test")
            .persist(&pages)
            .await
            .unwrap();

        for entry in std::fs::read_dir(&tmp).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    fn hidden_entries(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with('.'))
            .collect()
    }

    #[tokio::test]
    async fn unwritable_output_dir_is_io_error() {
        let tmp = temp_dir();
        // A regular file where the output directory should be.
        let blocked = tmp.join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let pages = execute(&glowboost_raw(), None);
        let err = JsonDirWriter::new(&blocked, "0.1.0-test")
            .persist(&pages)
            .await
            .unwrap_err();
        assert!(matches!(err, PagesmithError::Io { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn failed_manifest_write_leaves_no_pages() {
        let tmp = temp_dir();
        // The manifest cannot replace a directory, so the last rename fails.
        std::fs::create_dir(tmp.join("manifest.json")).unwrap();

        let pages = execute(&glowboost_raw(), None);
        let err = JsonDirWriter::new(&tmp, "0.1.0-test")
            .persist(&pages)
            .await
            .unwrap_err();
        assert!(matches!(err, PagesmithError::Io { .. }));
        assert!(err.to_string().contains("manifest.json"));

        assert!(!tmp.join("faq.json").exists());
        assert!(!tmp.join("product_page.json").exists());
        assert!(!tmp.join("comparison_page.json").exists());
        assert!(tmp.join("manifest.json").is_dir());
        assert_eq!(hidden_entries(&tmp), Vec::<String>::new());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn failed_write_restores_previous_pages() {
        let tmp = temp_dir();
        let no_manifest = OutputConfig {
            write_manifest: false,
            ..OutputConfig::default()
        };
        JsonDirWriter::new(&tmp, "0.1.0-test")
            .with_output(no_manifest)
            .persist(&execute(&glowboost_raw(), None))
            .await
            .unwrap();
        let previous = std::fs::read_to_string(tmp.join("product_page.json")).unwrap();

        std::fs::create_dir(tmp.join("manifest.json")).unwrap();
        let mut repriced = glowboost_raw();
        repriced.price = "₹999".into();
        JsonDirWriter::new(&tmp, "0.1.0-test")
            .persist(&execute(&repriced, None))
            .await
            .unwrap_err();

        let current = std::fs::read_to_string(tmp.join("product_page.json")).unwrap();
        assert_eq!(current, previous);
        assert!(current.contains("₹599"));
        assert!(tmp.join("faq.json").exists());
        assert!(tmp.join("comparison_page.json").exists());
        assert_eq!(hidden_entries(&tmp), Vec::<String>::new());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn disabling_manifest_removes_stale_one() {
        let tmp = temp_dir();
        let pages = execute(&glowboost_raw(), None);
        JsonDirWriter::new(&tmp, "0.1.0-test")
            .persist(&pages)
            .await
            .unwrap();
        assert!(tmp.join("manifest.json").exists());

        let no_manifest = OutputConfig {
            write_manifest: false,
            ..OutputConfig::default()
        };
        JsonDirWriter::new(&tmp, "0.1.0-test")
            .with_output(no_manifest)
            .persist(&pages)
            .await
            .unwrap();

        assert!(!tmp.join("manifest.json").exists());
        assert!(tmp.join("faq.json").exists());
        assert!(verify_output(&tmp).is_err());
        assert_eq!(hidden_entries(&tmp), Vec::<String>::new());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn rerun_replaces_previous_output() {
        let tmp = temp_dir();
        let writer = JsonDirWriter::new(&tmp, "0.1.0-test");
        writer.persist(&execute(&glowboost_raw(), None)).await.unwrap();

        let mut repriced = glowboost_raw();
        repriced.price = "₹999".into();
        let report = writer.persist(&execute(&repriced, None)).await.unwrap();

        let manifest = verify_output(&tmp).unwrap();
        assert_eq!(manifest.run_id, report.run_id);
        let product = std::fs::read_to_string(tmp.join("product_page.json")).unwrap();
        assert!(product.contains("₹999"));
        assert_eq!(hidden_entries(&tmp), Vec::<String>::new());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn verify_detects_tampering() {
        let tmp = temp_dir();
        let pages = execute(&glowboost_raw(), None);
        JsonDirWriter::new(&tmp, "0.1.0-test")
            .persist(&pages)
            .await
            .unwrap();

        let path = tmp.join("product_page.json");
        let mut content = std::fs::read_to_string(&path).unwrap();
        content = content.replace("₹599", "₹999");
        std::fs::write(&path, content).unwrap();

        let err = verify_output(&tmp).unwrap_err();
        assert!(err.to_string().contains("product_page.json"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn verify_missing_manifest() {
        let tmp = temp_dir();
        let err = verify_output(&tmp).unwrap_err();
        assert!(err.to_string().contains("missing manifest.json"));
        let _ = std::fs::remove_dir_all(&tmp);
    }
}
