use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Check a camera raw folder for stray files and empty directories"
)]
pub struct Cli {
    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Photo library root containing the raw folder
    #[arg(long)]
    pub root: Option<std::path::PathBuf>,

    /// Name of the raw folder below the root
    #[arg(long)]
    pub raw_folder: Option<String>,

    /// Allowed raw extensions, case-insensitive (e.g. 'nef' 'arw')
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Actually remove empty directories instead of only listing them
    #[arg(long)]
    pub apply: bool,
}
