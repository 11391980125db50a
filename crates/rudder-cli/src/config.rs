//! TOML configuration for the rudder driver.
//!
//! All sections are optional; CLI flags override file values.

use std::path::Path;

use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ring parameters.
    pub ring: RingSection,
    /// Seed nodes added before the first lookup sweep.
    pub nodes: Vec<NodeEntry>,
    /// Simulation parameters.
    pub simulate: SimulateSection,
}

/// `[ring]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RingSection {
    /// Virtual nodes per unit of weight.
    pub virtual_number: usize,
}

impl Default for RingSection {
    fn default() -> Self {
        Self {
            virtual_number: rudder::DEFAULT_VIRTUAL_NUMBER,
        }
    }
}

/// One `[[nodes]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeEntry {
    /// Node identifier.
    pub id: String,
    /// Declared weight.
    #[serde(default = "default_weight")]
    pub weight: i32,
}

fn default_weight() -> i32 {
    1
}

/// `[simulate]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulateSection {
    /// Number of random-key lookups per sweep.
    pub keys: usize,
}

impl Default for SimulateSection {
    fn default() -> Self {
        Self { keys: 1_000_000 }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                Ok(toml::from_str(&content)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
