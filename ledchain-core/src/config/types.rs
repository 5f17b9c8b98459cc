//! Configuration type definitions

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::topology::{Node, Topology, TopologyError};

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Default intensity (mid brightness)
pub const DEFAULT_INTENSITY: u8 = 0x08;

/// Errors while loading or storing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header (line number)
    InvalidSection(usize),
    /// Unknown key, or a line that is not `key = value` (line number)
    InvalidKey(usize),
    /// Value of the wrong type or out of range (line number)
    InvalidValue(usize),
    /// An element table without a `mode` key
    MissingMode,
    /// The described topology is invalid
    Topology(TopologyError),
    /// Binary data could not be decoded
    Deserialize,
    /// Configuration could not be encoded
    Serialize,
    /// Binary data has a different layout version
    VersionMismatch,
}

impl From<TopologyError> for ConfigError {
    fn from(e: TopologyError) -> Self {
        ConfigError::Topology(e)
    }
}

/// Chain-wide display settings applied when a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySettings {
    /// Brightness for every chip (0-15)
    pub intensity: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
        }
    }
}

/// Complete chain configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Session settings
    pub settings: DisplaySettings,
    /// Topology elements, in element index order
    pub elements: Vec<Node>,
}

impl Default for ChainConfig {
    /// One chip with one 8-digit seven-segment element
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            settings: DisplaySettings::default(),
            elements: vec![Node::seven_segment(0)],
        }
    }
}

impl ChainConfig {
    /// Build the topology this configuration describes
    pub fn topology(&self) -> Result<Topology, TopologyError> {
        Topology::build(self.elements.clone())
    }

    /// Encode as postcard binary
    #[cfg(feature = "serde")]
    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Serialize)
    }

    /// Decode postcard binary and check the layout version
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: ChainConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if config.version != CONFIG_VERSION {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Config version mismatch: found {}, expected {}",
                config.version,
                CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Mode;

    #[test]
    fn test_default_config_matches_default_topology() {
        let config = ChainConfig::default();
        let topology = config.topology().unwrap();

        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.settings.intensity, DEFAULT_INTENSITY);
        assert_eq!(topology.chip_count(), Topology::default().chip_count());
        assert_eq!(topology.mode_of(0), Ok(Mode::SevenSegment));
    }

    #[test]
    fn test_invalid_topology_reported() {
        let config = ChainConfig {
            elements: vec![],
            ..ChainConfig::default()
        };
        assert_eq!(config.topology().unwrap_err(), TopologyError::Empty);
    }
}
