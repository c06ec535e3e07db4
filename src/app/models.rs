use std::path::PathBuf;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub raw_folder: String,
    /// Lower-case, without the leading dot.
    pub allowed_extensions: Vec<String>,
    pub dry_run: bool,
}

impl RuntimeConfig {
    /// The directory that actually gets scanned: `<root>/<raw_folder>`.
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join(&self.raw_folder)
    }
}

/// Everything a single scan found. Paths are only valid for this run.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub invalid_files: Vec<PathBuf>,
    pub hidden_files: Vec<PathBuf>,
    pub empty_dirs: Vec<PathBuf>,
}
