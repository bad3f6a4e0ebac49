//! Identifier composition for Docmap outputs.
//!
//! All functions here are total and pure: deterministic string
//! composition for preprint DOIs with version suffix, evaluation DOIs,
//! DOI URLs, electronic article ids, volume numbers, and the stable
//! Docmap id.

use crate::config::DocmapConfig;
use crate::error::DocmapError;

/// Publisher-assigned DOI for one reviewed-preprint version:
/// `elife_doi + "." + elife_doi_version_str`.
pub fn preprint_version_doi(elife_doi: &str, elife_doi_version_str: &str) -> String {
    format!("{elife_doi}.{elife_doi_version_str}")
}

/// Version-of-record version string: the reviewed-preprint version
/// incremented by one, so the VOR follows the last reviewed preprint.
/// The same string suffixes the VOR DOI and fills its assertion item.
pub fn vor_version_str(elife_doi_version_str: &str) -> Result<String, DocmapError> {
    let version: u64 = elife_doi_version_str
        .parse()
        .map_err(|_| DocmapError::InvalidVersionString(elife_doi_version_str.to_string()))?;
    Ok((version + 1).to_string())
}

/// DOI for one evaluation: the version DOI plus the evaluation suffix.
pub fn evaluation_doi(preprint_version_doi: &str, evaluation_suffix: &str) -> String {
    format!("{preprint_version_doi}.{evaluation_suffix}")
}

/// Resolvable URL for a DOI.
pub fn doi_url(config: &DocmapConfig, doi: &str) -> String {
    format!("{}{doi}", config.doi_root_url)
}

/// Electronic article identifier: `RP` plus the manuscript id.
pub fn electronic_article_identifier(manuscript_id: &str) -> String {
    format!("RP{manuscript_id}")
}

/// Volume number derived from the publication year; `None` for years
/// before the publisher's first publication year.
pub fn volume_identifier(config: &DocmapConfig, publication_year: i32) -> Option<String> {
    let volume = publication_year - config.first_publication_year;
    if volume < 0 {
        None
    } else {
        Some(volume.to_string())
    }
}

/// Stable Docmap id: the configured prefix plus the URL-encoded key.
pub fn docmap_id(prefix: &str, key: &str) -> String {
    format!("{prefix}{}", urlencoding::encode(key))
}
