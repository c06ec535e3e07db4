use crate::app::formatter::OutputGenerator;
use crate::app::models::{RuntimeConfig, ScanResult};
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct Scanner {
    root: PathBuf,
    allowed_set: GlobSet,
    dry_run: bool,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root,
            allowed_set: build_extension_set(&config.allowed_extensions)?,
            dry_run: config.dry_run,
        })
    }

    /// Walks the whole tree below the root. Files are classified as the walk
    /// goes; directories are collected and only checked for emptiness once
    /// the walk has finished.
    pub fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();
        let mut directories = Vec::new();

        // Plain walker: no ignore files, hidden entries included, links not followed.
        let walker = WalkBuilder::new(&self.root).standard_filters(false).build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    continue;
                }
            };

            // The root itself is never reported.
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_some_and(|t| t.is_dir()) {
                directories.push(path.to_path_buf());
            } else if path.is_file() {
                self.classify_file(path, &mut result);
            }
        }

        for dir in directories {
            if is_empty(&dir) {
                log::debug!("empty: {}", dir.display());
                result.empty_dirs.push(dir);
            }
        }

        result
    }

    fn classify_file(&self, path: &Path, result: &mut ScanResult) {
        if is_hidden(path) {
            log::debug!("hidden: {}", path.display());
            result.hidden_files.push(path.to_path_buf());
        } else if !self.has_allowed_extension(path) {
            log::debug!("invalid extension: {}", path.display());
            result.invalid_files.push(path.to_path_buf());
        }
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.allowed_set.is_match(Path::new(name)))
    }

    /// Removes the given directories deepest first and returns how many were
    /// actually removed. In dry-run mode only lists them and returns 0.
    pub fn remove_empty(&self, empty_dirs: &[PathBuf]) -> usize {
        let mut ordered = empty_dirs.to_vec();
        ordered.sort();
        ordered.reverse();

        if self.dry_run {
            let planned = self.planned_removals(empty_dirs);
            println!("{}", OutputGenerator::dry_run_listing(&planned));
            return 0;
        }

        let mut removed: HashSet<PathBuf> = HashSet::new();
        for dir in ordered {
            if removed.contains(&dir) {
                continue;
            }

            if !dir.exists() {
                println!("Skipped directory {} as it no longer exists", dir.display());
                continue;
            }

            // Something may have been added since the scan.
            if !is_empty(&dir) {
                println!(
                    "Skipped directory {} as it is no longer empty",
                    dir.display()
                );
                continue;
            }

            if remove_dir(&dir) {
                self.prune_parents(&dir, &mut removed);
                removed.insert(dir);
            }
        }

        removed.len()
    }

    /// Everything a non-dry run would remove: the candidates plus every
    /// ancestor below the root whose entries would all be gone. Sorted
    /// deepest first.
    pub fn planned_removals(&self, empty_dirs: &[PathBuf]) -> Vec<PathBuf> {
        let mut doomed: HashSet<PathBuf> = empty_dirs.iter().cloned().collect();

        loop {
            let parents: HashSet<PathBuf> = doomed
                .iter()
                .filter_map(|dir| dir.parent())
                .filter(|parent| *parent != self.root && parent.starts_with(&self.root))
                .filter(|parent| !doomed.contains(*parent))
                .map(Path::to_path_buf)
                .collect();

            let newly_doomed: Vec<PathBuf> = parents
                .into_iter()
                .filter(|parent| only_contains(parent, &doomed))
                .collect();

            if newly_doomed.is_empty() {
                break;
            }
            doomed.extend(newly_doomed);
        }

        let mut planned: Vec<PathBuf> = doomed.into_iter().collect();
        planned.sort();
        planned.reverse();
        planned
    }

    /// Walks up from a freshly removed directory and removes every ancestor
    /// below the root that is now empty.
    fn prune_parents(&self, dir: &Path, removed: &mut HashSet<PathBuf>) {
        let mut current = dir.parent();
        while let Some(parent) = current {
            if parent == self.root || !parent.starts_with(&self.root) {
                break;
            }
            if !is_empty(parent) || !remove_dir(parent) {
                break;
            }
            removed.insert(parent.to_path_buf());
            current = parent.parent();
        }
    }
}

/// True if the last path segment starts with a dot.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// True only if listing the directory succeeds and yields nothing, hidden
/// entries included. Unreadable directories count as non-empty.
pub fn is_empty(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(err) => {
            log::warn!(
                "Could not check if directory {} is empty: {}",
                dir.display(),
                err
            );
            false
        }
    }
}

/// True if every entry of `dir` is in `doomed`. Unreadable means no.
fn only_contains(dir: &Path, doomed: &HashSet<PathBuf>) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("cannot list {}: {}", dir.display(), err);
            return false;
        }
    };
    for entry in entries {
        match entry {
            Ok(entry) if doomed.contains(&entry.path()) => {}
            _ => return false,
        }
    }
    true
}

fn remove_dir(dir: &Path) -> bool {
    match fs::remove_dir(dir) {
        Ok(()) => {
            println!("Removed empty directory: {}", dir.display());
            true
        }
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            log::error!(
                "Permission denied when trying to remove {}: {}",
                dir.display(),
                err
            );
            false
        }
        Err(err) => {
            log::error!("Error removing directory {}: {}", dir.display(), err);
            false
        }
    }
}

/// One case-insensitive `*.<ext>` glob per allowed extension, matched
/// against the file name only. Only the last suffix counts as the extension,
/// so extensions containing a dot are rejected.
fn build_extension_set(extensions: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        if ext.is_empty() || ext.contains('.') {
            anyhow::bail!("Invalid extension pattern: '{}'", ext);
        }
        let pattern = format!("*.{}", globset::escape(ext));
        builder.add(
            GlobBuilder::new(&pattern)
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .context(format!("Invalid extension pattern: {}", ext))?,
        );
    }
    Ok(builder.build()?)
}
