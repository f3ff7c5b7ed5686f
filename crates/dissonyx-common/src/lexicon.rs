//! Domain lexicons for claim and entity matching.
//!
//! The lexicons are injected into each analyzer call as plain values, so
//! tests can swap in alternate word lists without touching shared state.
//! All entries are lowercase; matching is substring containment over
//! lowercased document text, so a cue may match inside a longer word.

use serde::{Deserialize, Serialize};

/// Cue words signalling a positive (activating) claim.
const DEFAULT_POSITIVE_CUES: &[&str] = &[
    "induces",
    "promotes",
    "activates",
    "enhances",
    "drives",
];

/// Cue words signalling a negative (suppressing or uncertain) claim.
const DEFAULT_NEGATIVE_CUES: &[&str] = &[
    "inhibits",
    "suppresses",
    "fails to",
    "unclear",
    "controversial",
    "conflicting",
    "inconsistent",
    "unknown",
];

const DEFAULT_GENES: &[&str] = &["tcr", "cd4", "cd8", "foxp3", "il17", "il6"];

const DEFAULT_PATHWAYS: &[&str] = &[
    "immune tolerance",
    "autoimmunity",
    "inflammation",
    "t cell activation",
];

/// Positive and negative stance cues, in matching order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for CueLexicon {
    fn default() -> Self {
        Self {
            positive: to_owned(DEFAULT_POSITIVE_CUES),
            negative: to_owned(DEFAULT_NEGATIVE_CUES),
        }
    }
}

/// Gene symbols and pathway names, in matching order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityLexicon {
    pub genes: Vec<String>,
    pub pathways: Vec<String>,
}

impl Default for EntityLexicon {
    fn default() -> Self {
        Self {
            genes: to_owned(DEFAULT_GENES),
            pathways: to_owned(DEFAULT_PATHWAYS),
        }
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cues_nonempty() {
        let cues = CueLexicon::default();
        assert!(!cues.positive.is_empty());
        assert!(!cues.negative.is_empty());
        assert!(cues.positive.contains(&"induces".to_string()));
        assert!(cues.negative.contains(&"fails to".to_string()));
    }

    #[test]
    fn test_default_entries_are_lowercase() {
        let cues = CueLexicon::default();
        let entities = EntityLexicon::default();
        for word in cues
            .positive
            .iter()
            .chain(cues.negative.iter())
            .chain(entities.genes.iter())
            .chain(entities.pathways.iter())
        {
            assert_eq!(*word, word.to_lowercase(), "lexicon entry not lowercase: {word}");
        }
    }

    #[test]
    fn test_lexicon_json_roundtrip() {
        let entities = EntityLexicon::default();
        let json = serde_json::to_string(&entities).unwrap();
        let parsed: EntityLexicon = serde_json::from_str(&json).unwrap();
        assert_eq!(entities.genes, parsed.genes);
        assert_eq!(entities.pathways, parsed.pathways);
    }
}
