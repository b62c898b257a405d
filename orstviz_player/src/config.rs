//! Playback settings, from defaults, a TOML file, or the command line.
//!
//! ```toml
//! [player]
//! algorithm = "quick"
//! size = 40
//! speed = 25
//! seed = 7
//! ```

use std::fmt::{self, Display};
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use orstviz_steps::Algorithm;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Array sizes the interactive front end allows.
pub const SIZE_RANGE: RangeInclusive<usize> = 10..=100;

/// Playback rate in snapshots per second, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Speed(u32);

impl Speed {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    /// Clamps `steps_per_second` into `MIN..=MAX`.
    pub fn new(steps_per_second: u32) -> Self {
        Self(steps_per_second.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Time between two snapshots: one second divided by the speed.
    pub fn delay(self) -> Duration {
        Duration::from_secs(1) / self.0
    }

    pub fn faster(self, by: u32) -> Self {
        Self::new(self.0.saturating_add(by))
    }

    pub fn slower(self, by: u32) -> Self {
        Self::new(self.0.saturating_sub(by))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(50)
    }
}

impl From<u32> for Speed {
    fn from(value: u32) -> Self {
        Speed::new(value)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} steps/s", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything a [`Player`](crate::Player) needs to start up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub algorithm: Algorithm,
    pub size: usize,
    pub speed: Speed,

    /// Seed for the input arrays. Entropy is used when absent.
    pub seed: Option<u64>,

    /// Stop driving once a run completes instead of waiting for more commands.
    pub exit_on_complete: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            size: 50,
            speed: Speed::default(),
            seed: None,
            exit_on_complete: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    player: PlayerConfig,
}

impl PlayerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        Ok(file.player)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Pulls `size` into [`SIZE_RANGE`].
    pub fn clamped(mut self) -> Self {
        self.size = self.size.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_clamped() {
        assert_eq!(Speed::new(0).get(), 1);
        assert_eq!(Speed::new(500).get(), 100);
        assert_eq!(Speed::new(40).faster(100).get(), 100);
        assert_eq!(Speed::new(5).slower(10).get(), 1);
    }

    #[test]
    fn delay_spans_ten_ms_to_one_second() {
        assert_eq!(Speed::new(1).delay(), Duration::from_millis(1000));
        assert_eq!(Speed::new(100).delay(), Duration::from_millis(10));
        assert_eq!(Speed::new(50).delay(), Duration::from_millis(20));
    }

    #[test]
    fn parses_player_table() {
        let config = PlayerConfig::from_toml_str(
            r#"
            [player]
            algorithm = "heap"
            size = 30
            speed = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.algorithm, Algorithm::Heap);
        assert_eq!(config.size, 30);
        assert_eq!(config.speed.get(), 100);
        assert_eq!(config.seed, None);
        assert!(config.exit_on_complete);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(PlayerConfig::from_toml_str("").unwrap(), PlayerConfig::default());
    }

    #[test]
    fn rejects_unknown_keys_and_algorithms() {
        assert!(matches!(
            PlayerConfig::from_toml_str("[player]\nsped = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(PlayerConfig::from_toml_str("[player]\nalgorithm = \"bogo\"").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = PlayerConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn clamps_size() {
        let config = PlayerConfig {
            size: 3,
            ..PlayerConfig::default()
        };
        assert_eq!(config.clamped().size, 10);
    }
}
