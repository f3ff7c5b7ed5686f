//! dissonyx-common — Shared error type, domain lexicons, and analysis
//! configuration used across all Dissonyx crates.

pub mod config;
pub mod error;
pub mod lexicon;

// Re-export commonly used types
pub use config::{AnalysisConfig, SignalThresholds};
pub use error::{DissonyxError, Result};
pub use lexicon::{CueLexicon, EntityLexicon};
