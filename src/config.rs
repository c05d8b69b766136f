use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::metadata::lookup::DEFAULT_FALLBACK_SECS;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub metadata: MetadataSource,
    pub scrobble: Scrobble,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "failed to parse config TOML")
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct MetadataSource {
    /// Overrides the platform application-data Spotify directory
    pub root: Option<PathBuf>,
    /// Restricts lookups to a single account's metadata file
    pub user_filter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Scrobble {
    /// Tag sent along with every submission
    pub source_tag: String,
    /// Duration used when no metadata file knows the track
    pub fallback_duration_secs: u32,
    /// Fail lookups instead of falling back to the default duration
    pub strict: bool,
}

impl Default for Scrobble {
    fn default() -> Self {
        Self {
            source_tag: "spt".to_owned(),
            fallback_duration_secs: DEFAULT_FALLBACK_SECS,
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
[metadata]
root = "/home/dave/.config/Spotify"
user_filter = "dave"

[scrobble]
source_tag = "spt"
fallback_duration_secs = 240
strict = true
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(
            cfg.metadata.root,
            Some(PathBuf::from("/home/dave/.config/Spotify"))
        );
        assert_eq!(cfg.metadata.user_filter.as_deref(), Some("dave"));
        assert_eq!(cfg.scrobble.source_tag, "spt");
        assert_eq!(cfg.scrobble.fallback_duration_secs, 240);
        assert!(cfg.scrobble.strict);

        Ok(())
    }

    #[test]
    fn test_empty_config_uses_defaults() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("")?;

        assert_eq!(cfg.metadata.root, None);
        assert_eq!(cfg.metadata.user_filter, None);
        assert_eq!(cfg.scrobble.source_tag, "spt");
        assert_eq!(cfg.scrobble.fallback_duration_secs, 300);
        assert!(!cfg.scrobble.strict);

        Ok(())
    }
}
