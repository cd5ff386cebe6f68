//! Default configuration file creation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;

/// Render the commented default configuration.
pub fn default_config_contents() -> String {
    format!(
        "#[Quotes]\n\
         quote_url = \"{DEFAULT_QUOTE_URL}\" # JSON quote service\n\
         request_timeout = {DEFAULT_REQUEST_TIMEOUT} # Seconds before a fetch fails ({MINIMUM_REQUEST_TIMEOUT}-{MAXIMUM_REQUEST_TIMEOUT})\n\
         \n\
         #[Clock]\n\
         location = \"{DEFAULT_LOCATION}\" # Label shown under the clock\n\
         #timezone = \"Europe/London\" # IANA zone (defaults to system zone)\n"
    )
}

/// Create a default config file at `path`, including missing parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_contents())
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", path.display());
    Ok(())
}
