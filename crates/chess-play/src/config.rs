//! Configuration file loading for terminal play.
//!
//! Settings come from an optional `play.toml`; command-line flags override
//! whatever the file says.

use chess_core::Team;
use chess_engine::search::DEFAULT_DEPTH;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Which side or sides the engine plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineSide {
    White,
    #[default]
    Black,
    Both,
    None,
}

impl EngineSide {
    /// Returns true if the engine moves for `team`.
    pub fn plays(self, team: Team) -> bool {
        match self {
            EngineSide::White => team == Team::White,
            EngineSide::Black => team == Team::Black,
            EngineSide::Both => true,
            EngineSide::None => false,
        }
    }
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayConfig {
    /// Search depth in plies. Defaults to 4.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Side the engine plays. Defaults to black.
    #[serde(default)]
    pub engine: EngineSide,
    /// Starting position in FEN; the standard position when absent.
    #[serde(default)]
    pub fen: Option<String>,
}

fn default_depth() -> u32 {
    DEFAULT_DEPTH
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            depth: default_depth(),
            engine: EngineSide::default(),
            fen: None,
        }
    }
}

impl PlayConfig {
    /// Loads the configuration at `path`, or the defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Default location: `play.toml` in the working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("play.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config = PlayConfig::parse("").unwrap();
        assert_eq!(config, PlayConfig::default());
        assert_eq!(config.depth, 4);
        assert_eq!(config.engine, EngineSide::Black);
        assert_eq!(config.fen, None);
    }

    #[test]
    fn parses_all_fields() {
        let config = PlayConfig::parse(
            r#"
            depth = 2
            engine = "both"
            fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1"
            "#,
        )
        .unwrap();
        assert_eq!(config.depth, 2);
        assert_eq!(config.engine, EngineSide::Both);
        assert_eq!(
            config.fen.as_deref(),
            Some("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
        );
    }

    #[test]
    fn rejects_unknown_engine_side() {
        assert!(matches!(
            PlayConfig::parse(r#"engine = "red""#),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlayConfig::load(&dir.path().join("play.toml")).unwrap();
        assert_eq!(config, PlayConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "depth = 3\nengine = \"white\"").unwrap();
        let config = PlayConfig::load(file.path()).unwrap();
        assert_eq!(config.depth, 3);
        assert_eq!(config.engine, EngineSide::White);
    }

    #[test]
    fn engine_side_membership() {
        assert!(EngineSide::Both.plays(Team::White));
        assert!(EngineSide::Black.plays(Team::Black));
        assert!(!EngineSide::Black.plays(Team::White));
        assert!(!EngineSide::None.plays(Team::Black));
    }
}
