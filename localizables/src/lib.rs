#![forbid(unsafe_code)]
//! Reconcile Apple `.strings` localization files against an updated source.
//!
//! A destination file keeps its exact key set; every key the update also
//! defines gets the update's value, every other key keeps its own. Whole
//! `.lproj` trees can be processed at once: files are paired by language and
//! merged concurrently, and one broken file never stops the others.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use localizables::ResourceDocument;
//!
//! let mut destination = ResourceDocument::load("App/en.lproj/Localizable.strings")?;
//! let update = ResourceDocument::load("Export/en.lproj/Localizable.strings")?;
//!
//! let missing = destination.merge(&update);
//! println!("{} keys kept their old value", missing.len());
//! destination.save()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Trees are paired with [`FolderScanner`] and applied with
//! [`orchestrator::apply_all`]:
//!
//! ```rust,no_run
//! use localizables::{ApplyOptions, FolderScanner, ScanOptions, orchestrator};
//!
//! # async fn run() -> Result<(), localizables::Error> {
//! let pairs = FolderScanner::new("App", "Export", ScanOptions::new()).find_matches()?;
//! let summary = orchestrator::apply_all(pairs, &ApplyOptions::new()).await;
//! let (succeeded, failed) = summary.counts();
//! # Ok(())
//! # }
//! ```
//!
//! # Format
//!
//! Entries look like `"key" = "value";` and may be separated by blank lines,
//! `// line comments` and `/* block comments */`. Values can span lines and
//! contain escaped quotes; they are kept byte for byte. Saved files contain
//! one `"key"="value";` line per key, sorted case-insensitively.

pub mod atomic;
pub mod document;
pub mod error;
pub mod options;
pub mod orchestrator;
pub mod scanner;
pub mod strings;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    atomic::write_file_atomically,
    document::ResourceDocument,
    error::{Error, MalformedKind},
    options::{ApplyOptions, ScanOptions},
    orchestrator::{ApplySummary, MergeReport, PairFailure, PairOutcome},
    scanner::FolderScanner,
    types::{FilePair, Literal},
};
