//! Options for tree scanning and merge orchestration.

/// Controls how [`crate::FolderScanner`] finds and labels resource files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Language substituted for `Base.lproj` directories.
    pub base_language: String,
    /// Extension of resource files, without the leading dot.
    pub extension: String,
    /// Suffix stripped from the parent directory name to get the language.
    pub bundle_suffix: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            base_language: "en".to_string(),
            extension: "strings".to_string(),
            bundle_suffix: ".lproj".to_string(),
        }
    }
}

impl ScanOptions {
    /// Creates default scan options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language used for `Base` bundles.
    pub fn with_base_language(mut self, base_language: impl Into<String>) -> Self {
        self.base_language = base_language.into();
        self
    }

    /// Sets the resource file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Sets the language bundle directory suffix.
    pub fn with_bundle_suffix(mut self, bundle_suffix: impl Into<String>) -> Self {
        self.bundle_suffix = bundle_suffix.into();
        self
    }
}

/// Controls how [`crate::orchestrator::apply_all`] runs file merges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyOptions {
    /// Maximum number of pairs processed at once; `None` runs all of them.
    pub max_concurrency: Option<usize>,
    /// Merge and report without writing any file.
    pub dry_run: bool,
}

impl ApplyOptions {
    /// Creates default apply options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the number of concurrent pair merges. Zero means unbounded.
    pub fn with_max_concurrency(mut self, max_concurrency: Option<usize>) -> Self {
        self.max_concurrency = max_concurrency.filter(|&limit| limit > 0);
        self
    }

    /// Enables/disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
