//! The transformed snapshot served from the cache: every record's
//! Docmap for both producers, indexed by manuscript id, plus the
//! evaluation-text lookup derived from Kotahi email bodies.

use std::collections::HashMap;

use docmap_core::{build_docmap_value, parse_email_sections, DocmapConfig, Flavor, ManuscriptRecord};
use serde_json::Value;

use crate::ServiceError;

#[derive(Debug, Default)]
pub struct Snapshot {
    pub public_docmaps: Vec<Value>,
    pub kotahi_docmaps: Vec<Value>,
    public_by_id: HashMap<String, usize>,
    kotahi_by_id: HashMap<String, usize>,
    evaluation_texts: HashMap<String, String>,
}

impl Snapshot {
    pub fn public_by_manuscript_id(&self, manuscript_id: &str) -> Option<&Value> {
        self.public_by_id
            .get(manuscript_id)
            .map(|&index| &self.public_docmaps[index])
    }

    pub fn kotahi_by_manuscript_id(&self, manuscript_id: &str) -> Option<&Value> {
        self.kotahi_by_id
            .get(manuscript_id)
            .map(|&index| &self.kotahi_docmaps[index])
    }

    pub fn evaluation_text(&self, evaluation_id: &str) -> Option<&str> {
        self.evaluation_texts.get(evaluation_id).map(String::as_str)
    }
}

/// Transform every record for both producers. A record-shape error
/// anywhere aborts the snapshot: no partial Docmaps are ever served.
pub fn build_snapshot(
    config: &DocmapConfig,
    records: &[ManuscriptRecord],
) -> Result<Snapshot, ServiceError> {
    let mut snapshot = Snapshot::default();

    for record in records {
        if record.is_reviewed_preprint_type {
            let docmap = build_docmap_value(config, Flavor::Public, record)?;
            snapshot
                .public_by_id
                .insert(record.manuscript_id.clone(), snapshot.public_docmaps.len());
            snapshot.public_docmaps.push(docmap);
        } else {
            let docmap = build_docmap_value(config, Flavor::Kotahi, record)?;
            snapshot
                .kotahi_by_id
                .insert(record.manuscript_id.clone(), snapshot.kotahi_docmaps.len());
            snapshot.kotahi_docmaps.push(docmap);

            for version in &record.manuscript_versions {
                let Some(body) = version.email_body.as_deref() else {
                    continue;
                };
                for section in parse_email_sections(body) {
                    let id = section.evaluation_id(&version.long_manuscript_identifier);
                    snapshot.evaluation_texts.insert(id, section.evaluation_text);
                }
            }
        }
    }

    tracing::info!(
        public = snapshot.public_docmaps.len(),
        kotahi = snapshot.kotahi_docmaps.len(),
        evaluations = snapshot.evaluation_texts.len(),
        "snapshot built"
    );
    Ok(snapshot)
}
