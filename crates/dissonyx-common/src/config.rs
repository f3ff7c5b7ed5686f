//! Analysis run configuration.
//!
//! Everything the analyzers and the surrounding pipeline consume is a
//! plain value loaded from YAML/JSON or built from defaults. The
//! thresholds are classification cut-points for a downstream reporting
//! layer; the analyzers themselves never read them.

use serde::{Deserialize, Serialize};

use crate::lexicon::{CueLexicon, EntityLexicon};

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Literature search query handed to the corpus provider.
    #[serde(default = "default_query")]
    pub query: String,

    /// Corpus size bound requested from the provider.
    #[serde(default = "default_max_abstracts")]
    pub max_abstracts: usize,

    /// Vocabulary cap for term salience scoring.
    #[serde(default = "default_max_terms")]
    pub max_terms: usize,

    /// Signal classification cut-points.
    #[serde(default)]
    pub thresholds: SignalThresholds,

    /// Stance cue lists.
    #[serde(default)]
    pub cues: CueLexicon,

    /// Gene and pathway name lists.
    #[serde(default)]
    pub entities: EntityLexicon,
}

fn default_query() -> String {
    "autoreactive TCR epitope specificity".to_string()
}
fn default_max_abstracts() -> usize { 20 }
fn default_max_terms() -> usize { 100 }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
            max_abstracts: default_max_abstracts(),
            max_terms: default_max_terms(),
            thresholds: SignalThresholds::default(),
            cues: CueLexicon::default(),
            entities: EntityLexicon::default(),
        }
    }
}

/// Cut-points used by the reporting layer to flag a corpus as frustrating,
/// curious, or rare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalThresholds {
    #[serde(default = "default_frustration")]
    pub frustration: f64,

    #[serde(default = "default_curiosity")]
    pub curiosity: f64,

    #[serde(default = "default_rarity")]
    pub rarity: f64,
}

fn default_frustration() -> f64 { 0.3 }
fn default_curiosity() -> f64 { 0.15 }
fn default_rarity() -> f64 { 0.8 }

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            frustration: default_frustration(),
            curiosity: default_curiosity(),
            rarity: default_rarity(),
        }
    }
}

impl AnalysisConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.max_abstracts, 20);
        assert_eq!(config.max_terms, 100);
        assert!(config.query.contains("TCR"));
        assert!((config.thresholds.frustration - 0.3).abs() < f64::EPSILON);
        assert!((config.thresholds.curiosity - 0.15).abs() < f64::EPSILON);
        assert!((config.thresholds.rarity - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: AnalysisConfig = serde_yaml::from_str("max_terms: 50\n").unwrap();
        assert_eq!(config.max_terms, 50);
        assert_eq!(config.max_abstracts, 20);
        assert!(!config.cues.positive.is_empty());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalysisConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AnalysisConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.query, parsed.query);
        assert_eq!(config.entities.genes, parsed.entities.genes);
    }
}
