//! Configuration loading and listen-port resolution

use std::path::{Path, PathBuf};

use tracing::warn;

/// Listen-port resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve_listen_port(
    cli_arg: Option<u16>,
    env_var_name: &str,
    config_file_key: &str,
    default: u16,
) -> u16 {
    // Priority 1: Command-line argument
    if let Some(port) = cli_arg {
        return port;
    }

    // Priority 2: Environment variable
    if let Ok(value) = std::env::var(env_var_name) {
        match value.parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("Ignoring non-numeric {}={}", env_var_name, value),
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = find_config_file() {
        if let Some(port) = port_from_file(&path, config_file_key) {
            return port;
        }
    }

    // Priority 4: Compiled default
    default
}

/// Locate the config file for the platform
///
/// Checks `<config dir>/bugbash/config.toml` first, then
/// `/etc/bugbash/config.toml` on unix.
fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("bugbash").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    #[cfg(unix)]
    {
        let system_config = PathBuf::from("/etc/bugbash/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Read a port value for `key` out of a TOML file
///
/// Any read/parse failure resolves to None so the caller can fall through
/// to the compiled default.
fn port_from_file(path: &Path, key: &str) -> Option<u16> {
    let content = std::fs::read_to_string(path).ok()?;
    let config = toml::from_str::<toml::Value>(&content).ok()?;
    let value = config.get(key)?.as_integer()?;
    u16::try_from(value).ok()
}
