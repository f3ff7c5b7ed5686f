//! dissonyx-analysis — Corpus signal analyzers.
//!
//! Three independent, composable analyzers over the same ordered document
//! corpus: claim stance labelling with cross-document contradiction
//! detection, corpus-wide term salience, and gene–pathway co-occurrence
//! rarity. All three are pure functions of the input corpus and the
//! injected lexicons; none depends on another's output.

pub mod claims;
pub mod rarity;
pub mod salience;
pub mod stopwords;

pub use claims::{analyze_claims, Claim, ClaimAnalysis, ClaimLabel, Contradiction};
pub use rarity::score_gene_pathway_rarity;
pub use salience::score_terms;
pub use stopwords::english_stop_words;
