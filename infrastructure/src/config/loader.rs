//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "toolcall-agent";
const PROJECT_FILES: [&str; 2] = ["toolcall.toml", ".toolcall.toml"];
const ENV_PREFIX: &str = "TOOLCALL_";
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TOOLCALL_*` environment variables (`TOOLCALL_LLM__MODEL=...`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./toolcall.toml` or `./.toolcall.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/toolcall-agent/config.toml`
    /// 5. Default values
    ///
    /// `OPENAI_API_KEY` fills `llm.api_key` when no source sets it.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut files = Vec::new();
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            files.push(global_path);
        }
        if let Some(project_path) = Self::project_config_path() {
            files.push(project_path);
        }
        if let Some(path) = config_path {
            files.push(path.clone());
        }

        Ok(Self::with_env_api_key(Self::load_files(&files)?))
    }

    fn with_env_api_key(mut config: FileConfig) -> FileConfig {
        if config.llm.api_key().is_none() {
            config.llm.api_key = std::env::var(API_KEY_ENV).ok();
        }
        config
    }

    /// Merge defaults, the given files in order, then environment overrides.
    fn load_files(files: &[PathBuf]) -> Result<FileConfig, Box<figment::Error>> {
        let figment = files.iter().fold(
            Figment::new().merge(Serialized::defaults(FileConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        );

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    ///
    /// `OPENAI_API_KEY` is still honored; it is a credential, not a file.
    pub fn load_defaults() -> FileConfig {
        Self::with_env_api_key(FileConfig::default())
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/toolcall-agent/config.toml if set,
    /// otherwise falls back to ~/.config/toolcall-agent/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./toolcall.toml or ./.toolcall.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
