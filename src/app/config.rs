use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ROOT_DIR: &str = ".";
pub const DEFAULT_RAW_FOLDER: &str = "raw";
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["nef", "arw"];
pub const DEFAULT_DRY_RUN: bool = true;

const DEFAULT_PRESET: &str = "default";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    root: Option<PathBuf>,
    raw_folder: Option<String>,
    extensions: Option<Vec<String>>,
    dry_run: Option<bool>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("raw_sweep").join("presets.toml"))
}

fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

/// Trims, strips a leading dot, lower-cases and deduplicates while keeping order.
/// Only the last suffix of a file name is its extension, so multi-part
/// extensions such as `tar.gz` are dropped.
pub fn normalize_extensions<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.iter()
        .map(|ext| {
            let ext = ext.as_ref().trim();
            ext.strip_prefix('.').unwrap_or(ext).to_lowercase()
        })
        .filter(|ext| !ext.is_empty())
        .filter(|ext| {
            if ext.contains('.') {
                log::warn!("Ignoring extension '{}': only the last suffix is matched", ext);
                return false;
            }
            true
        })
        .filter(|ext| seen.insert(ext.clone()))
        .collect()
}

fn merge(cli: Cli, presets: &HashMap<String, PresetConfig>) -> RuntimeConfig {
    let preset_key = cli.preset.as_deref().unwrap_or(DEFAULT_PRESET);
    let preset = match presets.get(preset_key) {
        Some(preset) => preset.clone(),
        None => {
            if cli.preset.is_some() {
                log::warn!("Preset '{}' not found, using built-in defaults", preset_key);
            }
            PresetConfig::default()
        }
    };

    let extensions = cli.extensions.or(preset.extensions).unwrap_or_else(|| {
        DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    });

    RuntimeConfig {
        root: cli
            .root
            .or(preset.root)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR)),
        raw_folder: cli
            .raw_folder
            .or(preset.raw_folder)
            .unwrap_or_else(|| DEFAULT_RAW_FOLDER.to_string()),
        allowed_extensions: normalize_extensions(extensions.as_slice()),
        dry_run: if cli.apply {
            false
        } else {
            preset.dry_run.unwrap_or(DEFAULT_DRY_RUN)
        },
    }
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let presets = load_presets_file(&presets_path()?)?;
    Ok(merge(cli, &presets))
}
