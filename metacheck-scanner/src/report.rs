use crate::domain::MatchResult;
use crate::error::Result;
use crate::metadata::PageMetadata;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Format one report block for a scraped page.
///
/// Shape is fixed: the source URL, an `=` underline of exactly the same
/// character length, the match verdict, then the extracted fields (empty
/// when absent), then one blank separator line.
pub fn format_entry(metadata: &PageMetadata, match_result: MatchResult) -> String {
    let status = if match_result.is_matched() { "✓" } else { "FAIL" };
    let underline = "=".repeat(metadata.url.chars().count());

    format!(
        "{url}\n{underline}\nmatch {status}\ncanonical: {canonical}\ntitle: {title}\ndesc: {desc}\n\n",
        url = metadata.url,
        canonical = metadata.canonical.as_deref().unwrap_or(""),
        title = metadata.title.as_deref().unwrap_or(""),
        desc = metadata.description.as_deref().unwrap_or(""),
    )
}

/// Incremental writer for the report file.
///
/// Opened once per run and held for its whole duration; every entry is
/// flushed as soon as it is written, so an interrupted run keeps all
/// completed entries on disk. The handle is released by drop on every
/// exit path.
pub struct ReportWriter {
    file: File,
    path: PathBuf,
}

impl ReportWriter {
    /// Create the report file, making parent directories as needed.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        debug!("Opened report file {}", path.display());
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one formatted block and flush it immediately.
    pub fn write_entry(
        &mut self,
        metadata: &PageMetadata,
        match_result: MatchResult,
    ) -> Result<()> {
        let block = format_entry(metadata, match_result);
        self.file.write_all(block.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}
