//! Claim stance labelling and cross-document contradiction detection.

use dissonyx_common::lexicon::CueLexicon;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stance a single abstract takes toward the studied effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimLabel {
    /// Only positive cues matched.
    Positive,
    /// Only negative cues matched.
    Negative,
    /// Cues from both lists matched.
    Both,
    /// No cues matched.
    Neutral,
}

impl ClaimLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimLabel::Positive => "positive",
            ClaimLabel::Negative => "negative",
            ClaimLabel::Both => "both",
            ClaimLabel::Neutral => "neutral",
        }
    }
}

/// Stance record for one document, identified by its corpus index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub document: usize,
    pub label: ClaimLabel,
    /// Positive cues found in the document, in lexicon order.
    pub positive_cues: Vec<String>,
    /// Negative cues found in the document, in lexicon order.
    pub negative_cues: Vec<String>,
}

/// A Positive/Negative disagreement between two documents.
/// Always `earlier < later`; each qualifying pair is emitted exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub earlier: usize,
    pub later: usize,
}

/// Output of [`analyze_claims`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimAnalysis {
    /// One claim per document, in corpus order.
    pub claims: Vec<Claim>,
    /// Contradictions in ascending `(earlier, later)` order.
    pub contradictions: Vec<Contradiction>,
    /// Contradiction count over claim count (floored denominator).
    pub frustration: f64,
}

/// Label every document's stance and enumerate pairwise contradictions.
///
/// Matching is case-insensitive substring containment, so a cue can match
/// inside a longer word. The pair scan is O(n²) over the corpus, which is
/// bounded by the provider's abstract cap.
pub fn analyze_claims(documents: &[String], cues: &CueLexicon) -> ClaimAnalysis {
    let claims: Vec<Claim> = documents
        .iter()
        .enumerate()
        .map(|(index, doc)| label_document(index, doc, cues))
        .collect();

    let mut contradictions = Vec::new();
    for i in 0..claims.len() {
        for j in (i + 1)..claims.len() {
            if opposing(claims[i].label, claims[j].label) {
                contradictions.push(Contradiction { earlier: i, later: j });
            }
        }
    }

    let frustration = contradictions.len() as f64 / claims.len().max(1) as f64;

    debug!(
        "labelled {} documents, {} contradictions, frustration {:.3}",
        claims.len(),
        contradictions.len(),
        frustration
    );

    ClaimAnalysis {
        claims,
        contradictions,
        frustration,
    }
}

fn label_document(index: usize, document: &str, cues: &CueLexicon) -> Claim {
    let text = document.to_lowercase();

    let positive_cues: Vec<String> = cues
        .positive
        .iter()
        .filter(|cue| text.contains(cue.as_str()))
        .cloned()
        .collect();
    let negative_cues: Vec<String> = cues
        .negative
        .iter()
        .filter(|cue| text.contains(cue.as_str()))
        .cloned()
        .collect();

    let label = match (positive_cues.is_empty(), negative_cues.is_empty()) {
        (false, false) => ClaimLabel::Both,
        (false, true) => ClaimLabel::Positive,
        (true, false) => ClaimLabel::Negative,
        (true, true) => ClaimLabel::Neutral,
    };

    Claim {
        document: index,
        label,
        positive_cues,
        negative_cues,
    }
}

/// Only a Positive/Negative pair disagrees; Both and Neutral never
/// participate.
fn opposing(a: ClaimLabel, b: ClaimLabel) -> bool {
    matches!(
        (a, b),
        (ClaimLabel::Positive, ClaimLabel::Negative) | (ClaimLabel::Negative, ClaimLabel::Positive)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_label_assignment() {
        let cues = CueLexicon::default();
        let docs = corpus(&[
            "X induces inflammation.",
            "X inhibits inflammation.",
            "X induces but also inhibits inflammation.",
            "X is associated with inflammation.",
        ]);
        let analysis = analyze_claims(&docs, &cues);
        let labels: Vec<ClaimLabel> = analysis.claims.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![
                ClaimLabel::Positive,
                ClaimLabel::Negative,
                ClaimLabel::Both,
                ClaimLabel::Neutral,
            ]
        );
    }

    #[test]
    fn test_matched_cues_preserve_lexicon_order() {
        let cues = CueLexicon::default();
        let docs = corpus(&["It drives disease and also induces damage."]);
        let analysis = analyze_claims(&docs, &cues);
        // "induces" precedes "drives" in the lexicon regardless of text order.
        assert_eq!(analysis.claims[0].positive_cues, vec!["induces", "drives"]);
        assert!(analysis.claims[0].negative_cues.is_empty());
    }

    #[test]
    fn test_contradiction_pairs_and_frustration() {
        let cues = CueLexicon::default();
        let docs = corpus(&[
            "X induces inflammation.",
            "X inhibits inflammation.",
            "Y promotes tolerance.",
        ]);
        let analysis = analyze_claims(&docs, &cues);
        let labels: Vec<ClaimLabel> = analysis.claims.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![ClaimLabel::Positive, ClaimLabel::Negative, ClaimLabel::Positive]
        );
        // (0,1) is Positive/Negative and (1,2) is Negative/Positive; both
        // qualify and are emitted in ascending (i, j) order.
        assert_eq!(
            analysis.contradictions,
            vec![
                Contradiction { earlier: 0, later: 1 },
                Contradiction { earlier: 1, later: 2 },
            ]
        );
        assert!((analysis.frustration - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_neutral_document_does_not_pair() {
        let cues = CueLexicon::default();
        let docs = corpus(&[
            "X induces inflammation.",
            "X inhibits inflammation.",
            "Y is observed in tolerance.",
        ]);
        let analysis = analyze_claims(&docs, &cues);
        assert_eq!(
            analysis.contradictions,
            vec![Contradiction { earlier: 0, later: 1 }]
        );
        assert!((analysis.frustration - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_both_label_never_participates() {
        let cues = CueLexicon::default();
        let docs = corpus(&[
            "X induces and inhibits inflammation.",
            "X inhibits inflammation.",
            "X induces inflammation.",
        ]);
        let analysis = analyze_claims(&docs, &cues);
        assert_eq!(analysis.claims[0].label, ClaimLabel::Both);
        assert_eq!(
            analysis.contradictions,
            vec![Contradiction { earlier: 1, later: 2 }]
        );
    }

    #[test]
    fn test_empty_corpus() {
        let cues = CueLexicon::default();
        let analysis = analyze_claims(&[], &cues);
        assert!(analysis.claims.is_empty());
        assert!(analysis.contradictions.is_empty());
        assert_eq!(analysis.frustration, 0.0);
    }

    #[test]
    fn test_no_opposing_pair_means_zero_frustration() {
        let cues = CueLexicon::default();
        let docs = corpus(&[
            "A induces activation.",
            "B promotes activation.",
            "C enhances activation.",
        ]);
        let analysis = analyze_claims(&docs, &cues);
        assert!(analysis.contradictions.is_empty());
        assert_eq!(analysis.frustration, 0.0);
    }

    #[test]
    fn test_substring_matching_is_case_insensitive() {
        let cues = CueLexicon::default();
        let docs = corpus(&["TNF INDUCES apoptosis."]);
        let analysis = analyze_claims(&docs, &cues);
        assert_eq!(analysis.claims[0].label, ClaimLabel::Positive);
    }

    #[test]
    fn test_label_serializes_snake_case() {
        let json = serde_json::to_string(&ClaimLabel::Positive).unwrap();
        assert_eq!(json, "\"positive\"");
    }
}
