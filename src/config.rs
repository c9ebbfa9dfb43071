use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Launch flags that can be persisted to a config file.
///
/// Notes themselves are never persisted; these are terminal preferences
/// only. Flags merge global config, then the local override, then the
/// command line, with later layers winning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_sidebar: bool,
    pub no_welcome: bool,
}

impl ConfigFlags {
    pub const fn union(&self, other: &Self) -> Self {
        Self {
            no_sidebar: self.no_sidebar || other.no_sidebar,
            no_welcome: self.no_welcome || other.no_welcome,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("jotter").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("jotter")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("jotter").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("jotter")
                .join("config");
        }
    }

    PathBuf::from(".jotterrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".jotterrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# jotter defaults (saved with --save)".to_string());
    if flags.no_sidebar {
        lines.push("--no-sidebar".to_string());
    }
    if flags.no_welcome {
        lines.push("--no-welcome".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    for token in tokens {
        if token == "--no-sidebar" {
            flags.no_sidebar = true;
        } else if token == "--no-welcome" {
            flags.no_welcome = true;
        }
    }
    flags
}
