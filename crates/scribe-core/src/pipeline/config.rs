//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::parsers::ParseOptions;

/// How parsed commands are ordered before emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reversal {
    /// Reverse the whole flattened command list
    #[default]
    Global,
    /// Reverse each section's commands in place; sections keep their order
    PerSection,
}

/// Dispatcher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Emit reason-for-visit and HPI commands for sections with no lines
    pub emit_empty_narratives: bool,
    /// Emission ordering rule
    pub reversal: Reversal,
}

impl PipelineConfig {
    /// Load from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub(crate) fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            emit_empty_narratives: self.emit_empty_narratives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert!(!config.emit_empty_narratives);
        assert_eq!(config.reversal, Reversal::Global);
    }

    #[test]
    fn test_from_json_partial() {
        let config = PipelineConfig::from_json(r#"{"reversal": "per_section"}"#).unwrap();
        assert_eq!(config.reversal, Reversal::PerSection);
        assert!(!config.emit_empty_narratives);

        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_reversal() {
        assert!(PipelineConfig::from_json(r#"{"reversal": "sideways"}"#).is_err());
    }
}
