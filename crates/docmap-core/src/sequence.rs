//! Step sequencing and the Docmap envelope.
//!
//! The sequencer walks the manuscript's ordered versions, decides
//! which step kinds to emit for each, assigns dense blank-node ids,
//! and threads the `previous-step`/`next-step` links after the fact.

use serde::Serialize;
use serde_json::Value;

use crate::config::DocmapConfig;
use crate::error::DocmapError;
use crate::identifiers;
use crate::prune::prune_nones;
use crate::record::ManuscriptRecord;
use crate::steps::{self, ClassifiedEvaluation, Step};

/// The two producers sharing this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// The public enhanced-preprints variant, driven by structured
    /// evaluation records.
    Public,
    /// The Kotahi variant, driven by the text body of an editorial
    /// email.
    Kotahi,
}

/// A complete Docmap envelope. Immutable once built; serialized with
/// keys in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct Docmap {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "type")]
    pub docmap_type: &'static str,
    pub id: String,
    pub created: String,
    pub updated: String,
    pub publisher: serde_json::Map<String, Value>,
    #[serde(rename = "first-step")]
    pub first_step: &'static str,
    pub steps: serde_json::Map<String, Value>,
}

fn blank_node_id(index: usize) -> String {
    format!("_:b{index}")
}

/// Assemble one Docmap from one manuscript record.
pub fn build_docmap(
    config: &DocmapConfig,
    flavor: Flavor,
    record: &ManuscriptRecord,
) -> Result<Docmap, DocmapError> {
    let first_version = record.first_version()?;
    let elife_doi = record.elife_doi()?;

    let mut collected: Vec<Step> = Vec::new();
    let mut previous_evaluations: Vec<ClassifiedEvaluation> = Vec::new();
    let mut previous_version = None;

    for version in &record.manuscript_versions {
        if version.is_vor() {
            if version.position_in_overall_stage <= 1 {
                return Err(DocmapError::VorAtFirstPosition);
            }
            let previous = previous_version.ok_or(DocmapError::VorAtFirstPosition)?;
            collected.push(steps::vor_published_step(
                config, record, version, previous, elife_doi,
            )?);
        } else {
            let evaluations =
                steps::classify_version_evaluations(config, flavor, record, version, elife_doi)?;

            collected.push(steps::under_review_step(record, version, elife_doi));
            if !evaluations.is_empty() {
                if version.position_in_overall_stage == 1 {
                    collected.push(steps::peer_reviewed_step(flavor, version, &evaluations));
                } else {
                    collected.push(steps::revised_step(
                        record,
                        version,
                        elife_doi,
                        &evaluations,
                        &previous_evaluations,
                    ));
                }
            }
            if version.rp_publication_timestamp.is_some() {
                collected.push(steps::manuscript_published_step(
                    config,
                    flavor,
                    record,
                    version,
                    elife_doi,
                    &evaluations,
                ));
            }
            previous_evaluations = evaluations;
        }
        previous_version = Some(version);
    }

    // Assign dense blank-node ids and thread the step links. Missing
    // links are absent keys, not nulls.
    let step_count = collected.len();
    let mut step_map = serde_json::Map::new();
    for (index, mut step) in collected.into_iter().enumerate() {
        if index > 0 {
            step.previous_step = Some(blank_node_id(index - 1));
        }
        if index + 1 < step_count {
            step.next_step = Some(blank_node_id(index + 1));
        }
        step_map.insert(blank_node_id(index), serde_json::to_value(&step)?);
    }

    let id_prefix = match flavor {
        Flavor::Public => &config.public_docmap_id_prefix,
        Flavor::Kotahi => &config.kotahi_docmap_id_prefix,
    };
    let created = first_version.qc_complete_timestamp.to_rfc3339();

    Ok(Docmap {
        context: config.context_url.clone(),
        docmap_type: "docmap",
        id: identifiers::docmap_id(id_prefix, &record.manuscript_id),
        updated: created.clone(),
        created,
        publisher: record.publisher()?,
        first_step: "_:b0",
        steps: step_map,
    })
}

/// Assemble one Docmap and serialize it, pruning semantic nones, ready
/// to be emitted over HTTP.
pub fn build_docmap_value(
    config: &DocmapConfig,
    flavor: Flavor,
    record: &ManuscriptRecord,
) -> Result<Value, DocmapError> {
    let docmap = build_docmap(config, flavor, record)?;
    Ok(prune_nones(&serde_json::to_value(&docmap)?))
}
