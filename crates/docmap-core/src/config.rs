//! Engine configuration.
//!
//! Everything the engine consumes beyond the manuscript row itself is
//! collected in one configuration record: URL roots, the JSON-LD
//! context, the stable Docmap id prefixes, and the publisher's first
//! publication year (used for volume numbering).

/// Root URL prepended to DOIs.
pub const DOI_ROOT_URL: &str = "https://doi.org/";

/// The fixed Docmaps JSON-LD context.
pub const DOCMAPS_CONTEXT_URL: &str = "https://w3id.org/docmaps/context.jsonld";

/// eLife published its first article in 2012; volume numbers count up
/// from there.
pub const ELIFE_FIRST_PUBLICATION_YEAR: i32 = 2012;

const PUBLIC_DOCMAP_ID_PREFIX: &str = "https://data-hub-api.elifesciences.org\
     /enhanced-preprints/docmaps/v2/by-publisher/elife/get-by-manuscript-id?manuscript_id=";

const KOTAHI_DOCMAP_ID_PREFIX: &str = "https://data-hub-api.elifesciences.org\
     /kotahi/docmaps/v1/by-publisher/elife/get-by-manuscript-id?manuscript_id=";

const KOTAHI_EVALUATION_URL_PREFIX: &str = "https://data-hub-api.elifesciences.org\
     /kotahi/docmaps/v1/evaluation/get-by-evaluation-id?evaluation_id=";

/// Constants consumed by the assembly engine.
#[derive(Debug, Clone)]
pub struct DocmapConfig {
    pub doi_root_url: String,
    pub context_url: String,
    pub public_docmap_id_prefix: String,
    pub kotahi_docmap_id_prefix: String,
    pub kotahi_evaluation_url_prefix: String,
    pub first_publication_year: i32,
}

impl Default for DocmapConfig {
    fn default() -> Self {
        Self {
            doi_root_url: DOI_ROOT_URL.to_string(),
            context_url: DOCMAPS_CONTEXT_URL.to_string(),
            public_docmap_id_prefix: PUBLIC_DOCMAP_ID_PREFIX.to_string(),
            kotahi_docmap_id_prefix: KOTAHI_DOCMAP_ID_PREFIX.to_string(),
            kotahi_evaluation_url_prefix: KOTAHI_EVALUATION_URL_PREFIX.to_string(),
            first_publication_year: ELIFE_FIRST_PUBLICATION_YEAR,
        }
    }
}
