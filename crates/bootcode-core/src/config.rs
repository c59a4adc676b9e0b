//! Configuration types for the interpreter and the repair search.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the interpreter treats an instruction pointer that leaves the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Any pointer at or past the end of the program halts
    #[default]
    Lenient,
    /// Only a pointer exactly one past the last instruction halts
    Strict,
}

/// Interpreter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Out-of-range pointer handling
    pub bounds: BoundsPolicy,
}

/// One filtered scan of the repair search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPass {
    /// `jmp` with a negative argument, tried as `nop`
    NegativeJumps,
    /// `jmp` with a zero or positive argument, tried as `nop`
    NonNegativeJumps,
    /// `nop` with any argument, tried as `jmp`
    NoOps,
}

impl RepairPass {
    /// The order used when nothing else is configured
    pub const DEFAULT_ORDER: [RepairPass; 3] = [
        RepairPass::NegativeJumps,
        RepairPass::NonNegativeJumps,
        RepairPass::NoOps,
    ];
}

/// Repair search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Passes in priority order
    pub passes: Vec<RepairPass>,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            passes: RepairPass::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl RepairConfig {
    /// Configured passes with repeats removed, keeping the first occurrence
    pub fn ordered_passes(&self) -> Vec<RepairPass> {
        let mut seen = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            if !seen.contains(pass) {
                seen.push(*pass);
            }
        }
        seen
    }
}

/// Top-level configuration, as read from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub machine: MachineConfig,
    pub repair: RepairConfig,
}

impl BootConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = BootConfig::default();
        assert_eq!(config.machine.bounds, BoundsPolicy::Lenient);
        assert_eq!(
            config.repair.passes,
            vec![
                RepairPass::NegativeJumps,
                RepairPass::NonNegativeJumps,
                RepairPass::NoOps
            ]
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BootConfig::from_json_str(r#"{"machine": {"bounds": "strict"}}"#).unwrap();
        assert_eq!(config.machine.bounds, BoundsPolicy::Strict);
        assert_eq!(config.repair, RepairConfig::default());

        let config = BootConfig::from_json_str("{}").unwrap();
        assert_eq!(config, BootConfig::default());
    }

    #[test]
    fn test_custom_pass_order() {
        let config =
            BootConfig::from_json_str(r#"{"repair": {"passes": ["no_ops", "negative_jumps", "no_ops"]}}"#)
                .unwrap();
        assert_eq!(
            config.repair.ordered_passes(),
            vec![RepairPass::NoOps, RepairPass::NegativeJumps]
        );
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = BootConfig::from_json_str(r#"{"machine": {"bounds": "loose"}}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }

    #[test]
    fn test_config_serialization() {
        let config = BootConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = BootConfig::from_json_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
