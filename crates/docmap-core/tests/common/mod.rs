//! Shared builders for docmap assembly tests.

use chrono::{DateTime, FixedOffset};
use docmap_core::{Evaluation, ManuscriptRecord, ManuscriptVersion};
use serde_json::json;

pub fn timestamp(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).expect("test timestamp")
}

pub fn base_version(position: u32) -> ManuscriptVersion {
    ManuscriptVersion {
        long_manuscript_identifier: format!("eLife-RP-1-{position}"),
        position_in_overall_stage: position,
        qc_complete_timestamp: timestamp("2023-01-02T03:04:05+00:00"),
        under_review_timestamp: Some(timestamp("2023-01-03T00:00:00+00:00")),
        editor_details: vec![],
        senior_editor_details: vec![],
        preprint_url: "https://x/Av1".to_string(),
        preprint_doi: "10.1101/A".to_string(),
        preprint_version: "1".to_string(),
        preprint_published_at_date: None,
        elife_doi_version_str: "1".to_string(),
        meca_path: None,
        rp_meca_path: None,
        evaluations: vec![],
        rp_publication_timestamp: None,
        vor_publication_date: None,
        subject_areas: vec![],
        email_body: None,
        email_timestamp: None,
    }
}

pub fn base_record(versions: Vec<ManuscriptVersion>) -> ManuscriptRecord {
    ManuscriptRecord {
        publisher_json: json!({"id": "https://elifesciences.org/"}),
        manuscript_id: "1".to_string(),
        elife_doi: Some("10.7554/eLife.1".to_string()),
        license: Some("http://creativecommons.org/licenses/by/4.0/".to_string()),
        is_reviewed_preprint_type: true,
        manuscript_versions: versions,
        related_content: None,
    }
}

pub fn evaluation(tags: &[&str], suffix: &str, hypothesis_id: &str) -> Evaluation {
    Evaluation {
        hypothesis_id: hypothesis_id.to_string(),
        annotation_created_timestamp: timestamp("2023-02-01T10:00:00+00:00"),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        uri: "https://x/Av1".to_string(),
        source_version: None,
        evaluation_suffix: suffix.to_string(),
    }
}
