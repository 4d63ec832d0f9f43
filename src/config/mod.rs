#[cfg(feature = "cli")]
pub mod cli;
pub mod file_config;
#[cfg(feature = "lambda")]
pub mod lambda;

pub use file_config::FileConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "document-manager")]
#[command(about = "Manage documents, employees and roles against a local data directory")]
pub struct CliConfig {
    /// Directory holding the JSON collections and uploaded blobs [default: ./data]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the settings file when given and lets command-line flags win.
    pub fn resolve(&self) -> crate::utils::error::Result<FileConfig> {
        let mut settings = match &self.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        if let Some(data_dir) = &self.data_dir {
            settings.storage.data_dir = data_dir.clone();
        }
        Ok(settings)
    }
}
