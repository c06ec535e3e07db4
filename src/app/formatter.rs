use crate::app::models::{RuntimeConfig, ScanResult};
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 50;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_header(config: &RuntimeConfig, raw_dir: &Path) -> String {
        let extensions: Vec<String> = config
            .allowed_extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect();

        let mut out = format!("Checking for invalid files in {}\n", raw_dir.display());
        out.push_str(&format!("Allowed extensions: {}\n", extensions.join(", ")));
        if config.dry_run {
            out.push_str("Running in DRY RUN mode - no directories will be removed\n");
        }
        out.push_str(&"-".repeat(RULE_WIDTH));
        out
    }

    pub fn generate_invalid_section(files: &[PathBuf]) -> String {
        if files.is_empty() {
            return "No invalid extensions found. All files are valid raw camera files."
                .to_string();
        }
        format!(
            "\nFound {} files with invalid extensions:\n{}",
            files.len(),
            path_list(files)
        )
    }

    /// Empty when there is nothing hidden to report.
    pub fn generate_hidden_section(files: &[PathBuf]) -> String {
        if files.is_empty() {
            return String::new();
        }
        format!(
            "\nFound {} hidden files:\n{}",
            files.len(),
            path_list(files)
        )
    }

    pub fn generate_empty_section(dirs: &[PathBuf]) -> String {
        if dirs.is_empty() {
            return "\nNo empty directories found".to_string();
        }
        format!(
            "\nFound {} empty directories:\n{}",
            dirs.len(),
            path_list(dirs)
        )
    }

    pub fn dry_run_listing(ordered: &[PathBuf]) -> String {
        let mut out = String::from("\nDRY RUN - No directories will be removed\n");
        out.push_str("The following directories would be removed:\n");
        out.push_str(&path_list(ordered));
        out
    }

    pub fn generate_summary(result: &ScanResult, removed: usize, dry_run: bool) -> String {
        let mut out = String::new();
        if !dry_run && removed > 0 {
            out.push_str(&format!("\nRemoved {} empty directories\n", removed));
        }
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push_str(&format!(
            "\nSummary: {} invalid, {} hidden, {} empty, {} removed",
            result.invalid_files.len(),
            result.hidden_files.len(),
            result.empty_dirs.len(),
            removed
        ));
        out
    }
}

fn path_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("- {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
