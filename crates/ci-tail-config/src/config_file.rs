use anyhow::{Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

const CONFIG_FILE: &str = ".ci-tail.toml";

/// Load config file content from CWD first, then home directory
///
/// Searches for .ci-tail.toml in:
/// 1. Current working directory
/// 2. Home directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    if let Some(home_config) = get_home_config_path() {
        if let Ok(content) = std::fs::read_to_string(&home_config) {
            log::debug!("Loaded config from {}", home_config.display());
            return Some(content);
        }
    }

    None
}

/// Load config file content from an explicit path
///
/// Unlike [`load_config_file`], a missing file is an error here: the user
/// asked for this file by name.
pub fn load_config_from(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(content)
}

/// Get the path to the config file in the home directory
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_missing_file() {
        let path = env::temp_dir().join("ci-tail-does-not-exist.toml");
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("ci-tail-does-not-exist.toml"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = env::temp_dir().join(format!("ci-tail-config-{}.toml", std::process::id()));
        std::fs::write(&path, "server_url = \"http://ci.test\"\n").unwrap();
        let content = load_config_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(content.contains("http://ci.test"));
    }
}
