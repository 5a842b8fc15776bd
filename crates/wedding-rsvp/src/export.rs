//! Export and clear actions.
//!
//! Both actions talk to the guest through [`Dialogs`] (a blocking alert and
//! a blocking yes/no prompt) and export hands its file to a [`Download`]
//! sink. The page supplies real implementations; tests record calls.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::csv;
use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use crate::store::RecordStore;

/// Alert shown when there is nothing to export.
pub const NOTHING_TO_EXPORT: &str = "No RSVPs to export on this device.";

/// Confirmation asked before clearing.
pub const CLEAR_PROMPT: &str = "Clear all saved RSVPs on this device? This cannot be undone.";

/// Blocking dialogs.
pub trait Dialogs {
    /// Show a message and wait for it to be dismissed.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. Returns `true` on yes.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Destination for a generated file.
pub trait Download {
    /// Offer `contents` to the user under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be delivered.
    fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<()>;
}

/// Writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct FileDownload {
    dir: PathBuf,
    written: Option<PathBuf>,
}

impl FileDownload {
    /// Download into `dir`, creating it on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: None,
        }
    }

    /// The target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the last file written, if any.
    #[must_use]
    pub fn last_written(&self) -> Option<&Path> {
        self.written.as_deref()
    }
}

impl Download for FileDownload {
    fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<()> {
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|source| Error::DirectoryCreate {
                path: self.dir.clone(),
                source,
            })?;
        }

        let path = self.dir.join(file_name);
        std::fs::write(&path, contents).map_err(|source| Error::FileWrite {
            path: path.clone(),
            source,
        })?;

        info!("Wrote {} ({} bytes)", path.display(), contents.len());
        self.written = Some(path);
        Ok(())
    }
}

/// What an export produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The store was empty; the guest was alerted.
    NothingToExport,
    /// A CSV with this many data rows was downloaded.
    Exported {
        /// Number of records written.
        rows: usize,
    },
}

/// What a clear request produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The guest confirmed and the store was cleared.
    Cleared,
    /// The guest declined; nothing changed.
    Cancelled,
}

/// Export and clear handlers.
#[derive(Debug, Clone)]
pub struct ExportController {
    file_name: String,
}

impl Default for ExportController {
    fn default() -> Self {
        Self::new(csv::EXPORT_FILE_NAME)
    }
}

impl ExportController {
    /// Create a controller that offers exports under `file_name`.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// The export file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Export all stored records as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the download sink fails.
    pub fn export<B, D, S>(
        &self,
        store: &RecordStore<B>,
        dialogs: &mut D,
        sink: &mut S,
    ) -> Result<ExportOutcome>
    where
        B: StorageBackend,
        D: Dialogs + ?Sized,
        S: Download + ?Sized,
    {
        let records = store.load();
        if records.is_empty() {
            debug!("Export requested with no stored RSVPs");
            dialogs.alert(NOTHING_TO_EXPORT);
            return Ok(ExportOutcome::NothingToExport);
        }

        let document = csv::encode(&records);
        sink.download(&self.file_name, document.as_bytes())?;
        info!(rows = records.len(), file = %self.file_name, "Exported RSVPs");
        Ok(ExportOutcome::Exported {
            rows: records.len(),
        })
    }

    /// Clear the store after the guest confirms.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn clear<B, D>(&self, store: &mut RecordStore<B>, dialogs: &mut D) -> Result<ClearOutcome>
    where
        B: StorageBackend,
        D: Dialogs + ?Sized,
    {
        if !dialogs.confirm(CLEAR_PROMPT) {
            debug!("Clear cancelled");
            return Ok(ClearOutcome::Cancelled);
        }

        store.clear()?;
        info!("Cleared all stored RSVPs");
        Ok(ClearOutcome::Cleared)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Dialogs, Download};
    use crate::error::Result;

    /// Dialogs that record what they were shown and answer a fixed reply.
    #[derive(Debug, Default)]
    pub struct ScriptedDialogs {
        pub answer: bool,
        pub alerts: Vec<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedDialogs {
        pub fn answering(answer: bool) -> Self {
            Self {
                answer,
                ..Self::default()
            }
        }
    }

    impl Dialogs for ScriptedDialogs {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.prompts.push(message.to_string());
            self.answer
        }
    }

    /// Keeps downloads in memory.
    #[derive(Debug, Default)]
    pub struct MemoryDownload {
        pub files: Vec<(String, Vec<u8>)>,
    }

    impl Download for MemoryDownload {
        fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<()> {
            self.files.push((file_name.to_string(), contents.to_vec()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{MemoryDownload, ScriptedDialogs};
    use super::*;
    use crate::record::fixtures::record;
    use crate::storage::MemoryStorage;

    fn store_with(names: &[&str]) -> RecordStore<MemoryStorage> {
        let mut store = RecordStore::new(MemoryStorage::new());
        for (minute, name) in (0u32..).zip(names) {
            store.append(record(name, minute)).unwrap();
        }
        store
    }

    #[test]
    fn test_export_empty_alerts_without_download() {
        let store = store_with(&[]);
        let mut dialogs = ScriptedDialogs::default();
        let mut sink = MemoryDownload::default();

        let outcome = ExportController::default()
            .export(&store, &mut dialogs, &mut sink)
            .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert_eq!(dialogs.alerts, vec![NOTHING_TO_EXPORT.to_string()]);
        assert!(sink.files.is_empty());
    }

    #[test]
    fn test_export_downloads_csv() {
        let store = store_with(&["Ada", "Bo"]);
        let mut dialogs = ScriptedDialogs::default();
        let mut sink = MemoryDownload::default();

        let outcome = ExportController::default()
            .export(&store, &mut dialogs, &mut sink)
            .unwrap();

        assert_eq!(outcome, ExportOutcome::Exported { rows: 2 });
        assert!(dialogs.alerts.is_empty());
        let (name, bytes) = &sink.files[0];
        assert_eq!(name, "wedding_rsvps.csv");
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            csv::encode(&store.load())
        );
    }

    #[test]
    fn test_clear_confirmed() {
        let mut store = store_with(&["Ada"]);
        let mut dialogs = ScriptedDialogs::answering(true);

        let outcome = ExportController::default()
            .clear(&mut store, &mut dialogs)
            .unwrap();

        assert_eq!(outcome, ClearOutcome::Cleared);
        assert_eq!(dialogs.prompts, vec![CLEAR_PROMPT.to_string()]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_cancelled() {
        let mut store = store_with(&["Ada", "Bo"]);
        let before = store.load();
        let mut dialogs = ScriptedDialogs::answering(false);

        let outcome = ExportController::default()
            .clear(&mut store, &mut dialogs)
            .unwrap();

        assert_eq!(outcome, ClearOutcome::Cancelled);
        assert_eq!(store.load(), before);
    }

    #[test]
    fn test_file_download_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let mut sink = FileDownload::new(&target);

        sink.download("wedding_rsvps.csv", b"a,b").unwrap();

        let written = sink.last_written().unwrap();
        assert_eq!(written, target.join("wedding_rsvps.csv"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "a,b");
    }

    #[test]
    fn test_custom_file_name() {
        let store = store_with(&["Ada"]);
        let mut dialogs = ScriptedDialogs::default();
        let mut sink = MemoryDownload::default();
        let controller = ExportController::new("guests.csv");

        controller.export(&store, &mut dialogs, &mut sink).unwrap();

        assert_eq!(controller.file_name(), "guests.csv");
        assert_eq!(sink.files[0].0, "guests.csv");
    }
}
