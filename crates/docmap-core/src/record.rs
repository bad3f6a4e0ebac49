//! Input model: one row from the upstream analytical store.
//!
//! The row is decoded once at the boundary; every "optional" upstream
//! field is an explicit `Option` here. The engine never mutates a
//! record.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DocmapError;

/// One manuscript with its ordered version history.
///
/// Invariant: `manuscript_versions` is non-empty and ordered by
/// `position_in_overall_stage` ascending (the store guarantees the
/// ordering; emptiness is rejected by the engine).
#[derive(Debug, Clone, Deserialize)]
pub struct ManuscriptRecord {
    /// Publisher envelope, either a JSON object or a string literal
    /// holding one. Normalized via [`ManuscriptRecord::publisher`].
    pub publisher_json: Value,
    /// Stable short id, used in URLs and the electronic article id.
    pub manuscript_id: String,
    /// Publisher-side DOI base, e.g. `10.7554/eLife.80494`.
    pub elife_doi: Option<String>,
    /// License URI applied to outputs.
    pub license: Option<String>,
    /// Selects the public reviewed-preprint producer for this record.
    #[serde(default)]
    pub is_reviewed_preprint_type: bool,
    pub manuscript_versions: Vec<ManuscriptVersion>,
    pub related_content: Option<Vec<RelatedContent>>,
}

impl ManuscriptRecord {
    /// The publisher envelope as a mapping, regardless of whether the
    /// store held a mapping or a string literal.
    pub fn publisher(&self) -> Result<serde_json::Map<String, Value>, DocmapError> {
        match &self.publisher_json {
            Value::Object(map) => Ok(map.clone()),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => Ok(map),
                _ => Err(DocmapError::InvalidPublisher),
            },
            _ => Err(DocmapError::InvalidPublisher),
        }
    }

    /// The publisher-side DOI base; empty or absent rejects the record.
    pub fn elife_doi(&self) -> Result<&str, DocmapError> {
        match self.elife_doi.as_deref() {
            Some(doi) if !doi.is_empty() => Ok(doi),
            _ => Err(DocmapError::MissingField("elife_doi")),
        }
    }

    /// The original preprint version.
    pub fn first_version(&self) -> Result<&ManuscriptVersion, DocmapError> {
        self.manuscript_versions
            .first()
            .ok_or(DocmapError::NoVersions)
    }
}

/// One entry in a manuscript's version history.
///
/// The first entry is the original preprint; later entries are
/// revisions or the version of record.
#[derive(Debug, Clone, Deserialize)]
pub struct ManuscriptVersion {
    /// Contains the substring `-VOR-` iff this entry is a
    /// version-of-record.
    pub long_manuscript_identifier: String,
    /// 1-based position within the manuscript's overall stage.
    pub position_in_overall_stage: u32,
    pub qc_complete_timestamp: DateTime<FixedOffset>,
    pub under_review_timestamp: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub editor_details: Vec<EditorDetails>,
    #[serde(default)]
    pub senior_editor_details: Vec<EditorDetails>,
    pub preprint_url: String,
    pub preprint_doi: String,
    pub preprint_version: String,
    pub preprint_published_at_date: Option<NaiveDate>,
    /// Publisher-side version number, as a decimal string.
    pub elife_doi_version_str: String,
    pub meca_path: Option<String>,
    pub rp_meca_path: Option<String>,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
    pub rp_publication_timestamp: Option<DateTime<FixedOffset>>,
    pub vor_publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub subject_areas: Vec<String>,
    /// Kotahi only: the editorial email this version's evaluations are
    /// parsed from.
    pub email_body: Option<String>,
    pub email_timestamp: Option<DateTime<FixedOffset>>,
}

impl ManuscriptVersion {
    pub fn is_vor(&self) -> bool {
        self.long_manuscript_identifier.contains("-VOR-")
    }
}

/// One structured evaluation record (public variant).
#[derive(Debug, Clone, Deserialize)]
pub struct Evaluation {
    pub hypothesis_id: String,
    pub annotation_created_timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The preprint URL this evaluation refers to. Evaluations whose
    /// `uri` does not match the version's `preprint_url` are ignored
    /// at that version.
    pub uri: String,
    pub source_version: Option<String>,
    /// Unique within the version, e.g. `sa0`.
    pub evaluation_suffix: String,
}

/// Reviewer/editor metadata for named participants.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorDetails {
    pub name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub institution: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// A related article, collection, or podcast chapter. Exactly one of
/// the three id fields is set per entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedContent {
    pub manuscript_id: Option<String>,
    pub manuscript_type: Option<String>,
    pub manuscript_title: Option<String>,
    pub manuscript_authors_csv: Option<String>,
    pub collection_id: Option<String>,
    pub collection_title: Option<String>,
    pub collection_curator_name: Option<String>,
    #[serde(default)]
    pub is_collection_curator_et_al: bool,
    pub collection_thumbnail_url: Option<String>,
    pub podcast_id: Option<i64>,
    pub podcast_chapter_time: Option<i64>,
    pub podcast_chapter_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn publisher_accepts_mapping() {
        let record: ManuscriptRecord = serde_json::from_value(json!({
            "publisher_json": {"id": "https://elifesciences.org/"},
            "manuscript_id": "1",
            "manuscript_versions": [],
        }))
        .unwrap();
        let publisher = record.publisher().unwrap();
        assert_eq!(publisher["id"], "https://elifesciences.org/");
    }

    #[test]
    fn publisher_accepts_string_literal() {
        let record: ManuscriptRecord = serde_json::from_value(json!({
            "publisher_json": "{\"id\": \"https://elifesciences.org/\"}",
            "manuscript_id": "1",
            "manuscript_versions": [],
        }))
        .unwrap();
        let publisher = record.publisher().unwrap();
        assert_eq!(publisher["id"], "https://elifesciences.org/");
    }

    #[test]
    fn publisher_rejects_non_object() {
        let record: ManuscriptRecord = serde_json::from_value(json!({
            "publisher_json": "[1, 2]",
            "manuscript_id": "1",
            "manuscript_versions": [],
        }))
        .unwrap();
        assert!(matches!(
            record.publisher(),
            Err(DocmapError::InvalidPublisher)
        ));
    }

    #[test]
    fn elife_doi_rejects_empty() {
        let record: ManuscriptRecord = serde_json::from_value(json!({
            "publisher_json": {},
            "manuscript_id": "1",
            "elife_doi": "",
            "manuscript_versions": [],
        }))
        .unwrap();
        assert!(matches!(
            record.elife_doi(),
            Err(DocmapError::MissingField("elife_doi"))
        ));
    }

    #[test]
    fn vor_detection_via_long_identifier() {
        let version: ManuscriptVersion = serde_json::from_value(json!({
            "long_manuscript_identifier": "eLife-RP-VOR-85111",
            "position_in_overall_stage": 2,
            "qc_complete_timestamp": "2023-01-02T03:04:05+00:00",
            "preprint_url": "https://example.org/v1",
            "preprint_doi": "10.1101/x",
            "preprint_version": "1",
            "elife_doi_version_str": "1",
        }))
        .unwrap();
        assert!(version.is_vor());
    }
}
