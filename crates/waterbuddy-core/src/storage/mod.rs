mod config;

pub use config::{Config, DisplayConfig, LoggingConfig, TipsConfig};

use std::path::PathBuf;

/// Returns `~/.config/waterbuddy[-dev]/` based on WATERBUDDY_ENV.
///
/// Set WATERBUDDY_ENV=dev to use the development directory.
/// WATERBUDDY_HOME replaces the home directory (used by tests).
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let home = std::env::var_os("WATERBUDDY_HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let base_dir = home.join(".config");

    let env = std::env::var("WATERBUDDY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("waterbuddy-dev")
    } else {
        base_dir.join("waterbuddy")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
