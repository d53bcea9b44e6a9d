use log::{info, warn, debug};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::bibliography::{BibliographyDocument, BibliographyEntry};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::sorter::{self, KeyedEntry};
use crate::sort_key::SortKey;

// @module: Application controller for the sorting pipeline

/// A parsed bibliography with its entries in document order
#[derive(Debug, Clone)]
pub struct PreparedBibliography {
    pub document: BibliographyDocument,
    pub entries: Vec<BibliographyEntry>,
}

impl PreparedBibliography {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// A fully ordered and reassembled bibliography, ready to be written
#[derive(Debug, Clone)]
pub struct SortedBibliography {
    /// Number of entries in the output
    pub entry_count: usize,

    /// Complete output document text
    pub content: String,
}

/// Outcome of a complete run
#[derive(Debug, Clone)]
pub struct SortReport {
    pub entry_count: usize,
    pub output_file: PathBuf,
}

impl SortReport {
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    // @returns: Operator lines announcing a successful write
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Successfully sorted {} references.", self.entry_count),
            format!("Results saved to file: '{}'", self.output_file.display()),
        ]
    }
}

// @returns: Operator lines announcing how many entries were found
pub fn detection_lines(entry_count: usize) -> Vec<String> {
    let mut lines = vec![format!("Detected {} reference entries.", entry_count)];
    if entry_count == 0 {
        lines.push(
            "Warning: No reference entries detected. The output file will contain only the bibliography header and footer."
                .to_string(),
        );
    }
    lines
}

/// Diagnostic row for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyListing {
    /// Zero-based position in the input document
    pub position: usize,
    pub key: SortKey,
    /// First line of the entry text
    pub label: String,
}

impl From<KeyedEntry<'_>> for KeyListing {
    fn from(keyed: KeyedEntry<'_>) -> Self {
        Self {
            position: keyed.position,
            label: keyed.entry.text().lines().next().unwrap_or_default().to_string(),
            key: keyed.key,
        }
    }
}

/// Main application controller for bibliography sorting
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the input and split it into envelope and entries
    pub fn prepare(&self) -> Result<PreparedBibliography, AppError> {
        let content = self.load_input(&self.config.input_file)?;
        let document = BibliographyDocument::parse_with_argument(&content, &self.config.environment_argument)?;
        let entries = document.entries();

        info!("Detected {} entries in {:?}", entries.len(), self.config.input_file);
        if entries.is_empty() {
            warn!("No reference entries detected; output will contain only header and footer");
        }

        Ok(PreparedBibliography { document, entries })
    }

    /// Order the entries and reassemble the document. Nothing is written.
    pub fn sort(&self, prepared: PreparedBibliography) -> Result<SortedBibliography, AppError> {
        let PreparedBibliography { document, entries } = prepared;

        let sorted = sorter::try_sort_entries(entries)?;
        let content = document.render_with_separator(&sorted, &self.config.entry_separator);

        Ok(SortedBibliography {
            entry_count: sorted.len(),
            content,
        })
    }

    /// Write a sorted bibliography to the configured output file
    pub fn write(&self, sorted: &SortedBibliography) -> Result<PathBuf, AppError> {
        let output_file = self.config.output_file.clone();
        FileManager::write_to_file(&output_file, &sorted.content)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        info!("Wrote {} entries to {:?}", sorted.entry_count, output_file);
        Ok(output_file)
    }

    /// Run the whole pipeline: load, split, sort, write
    pub fn run(&self) -> Result<SortReport, AppError> {
        self.run_with_progress(|_| {})
    }

    /// Like [`Controller::run`], calling `on_detected` with the entry count before sorting starts
    pub fn run_with_progress<F>(&self, on_detected: F) -> Result<SortReport, AppError>
    where
        F: FnOnce(usize),
    {
        let prepared = self.prepare()?;
        on_detected(prepared.entry_count());
        let sorted = self.sort(prepared)?;
        let output_file = self.write(&sorted)?;

        Ok(SortReport {
            entry_count: sorted.entry_count,
            output_file,
        })
    }

    /// Whether the input entries are already in sorted order
    pub fn check(&self) -> Result<bool, AppError> {
        let prepared = self.prepare()?;
        Ok(sorter::is_sorted(&prepared.entries))
    }

    /// Sort keys of every input entry, in output order
    pub fn inspect_keys(&self) -> Result<Vec<KeyListing>, AppError> {
        let prepared = self.prepare()?;
        let listings = sorter::keyed_entries(&prepared.entries)
            .into_iter()
            .map(KeyListing::from)
            .collect();
        Ok(listings)
    }

    fn load_input(&self, path: &Path) -> Result<String, AppError> {
        if !FileManager::file_exists(path) {
            return Err(AppError::MissingInput(path.to_path_buf()));
        }

        debug!("Reading bibliography from {:?}", path);
        FileManager::read_to_string(path).map_err(|e| AppError::File(format!("{:#}", e)))
    }
}
