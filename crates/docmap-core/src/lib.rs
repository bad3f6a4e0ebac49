//! docmap-core: assembly engine for Docmap JSON-LD documents
//!
//! This crate turns one row from the manuscript warehouse (a
//! [`ManuscriptRecord`]) into one Docmap: a typed, ordered,
//! cross-linked sequence of editorial lifecycle steps (preprint
//! posted, taken under review, peer-reviewed, revised, version of
//! record published).
//!
//! The transformation is pure and single-threaded per record: no I/O,
//! no shared state. Two producer flavors share the engine:
//! [`Flavor::Public`] (the enhanced-preprints variant, driven by
//! structured evaluation records) and [`Flavor::Kotahi`] (driven by
//! the text body of an editorial email).

pub mod classify;
pub mod config;
pub mod email;
pub mod error;
pub mod fragments;
pub mod identifiers;
pub mod participants;
pub mod prune;
pub mod record;
pub mod sequence;
pub mod steps;

// Re-export the main types for convenience
pub use classify::{classify_tags, EvaluationType};
pub use config::DocmapConfig;
pub use email::{parse_email_sections, EvaluationEmailSection};
pub use error::DocmapError;
pub use prune::prune_nones;
pub use record::{
    EditorDetails, Evaluation, ManuscriptRecord, ManuscriptVersion, RelatedContent,
};
pub use sequence::{build_docmap, build_docmap_value, Docmap, Flavor};
