/*!
 * # bibsort - sort a LaTeX thebibliography by first author
 *
 * A Rust library for reordering the `\bibitem` entries of a
 * `thebibliography` environment alphabetically by the first author's surname.
 *
 * ## Features
 *
 * - Split a document into header, entry body and footer around
 *   `\begin{thebibliography}{00}` and `\end{thebibliography}`
 * - Partition the body into `\bibitem[...]` entries
 * - Derive a surname sort key with layered pattern matching
 * - Stable, case-insensitive ordering
 * - Byte-identical output when run again on sorted input
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `bibliography`: Envelope and entry splitting, document reassembly
 * - `sort_key`: Surname extraction strategies
 * - `sorter`: Entry ordering and key diagnostics
 * - `app_controller`: Load, sort and write pipeline
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod bibliography;
pub mod errors;
pub mod file_utils;
pub mod sort_key;
pub mod sorter;

// Re-export main types for easier usage
pub use app_config::{Config, LogLevel};
pub use app_controller::{Controller, SortReport};
pub use bibliography::{BibliographyDocument, BibliographyEntry, split_entries};
pub use sort_key::{extract_key, KeyStrategy, SortKey};
pub use sorter::sort_entries;
pub use errors::{AppError, BibliographyError};
