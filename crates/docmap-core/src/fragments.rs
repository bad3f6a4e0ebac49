//! Typed constructors for the leaf objects of a Docmap step: inputs,
//! outputs, assertion items, the `partOf` section, and related-content
//! complements.
//!
//! Key order in the emitted JSON is the declaration order of the
//! structs here; `Option` fields are omitted when `None`.

use serde::Serialize;

use crate::classify::EvaluationType;
use crate::config::DocmapConfig;
use crate::identifiers;
use crate::record::{ManuscriptRecord, ManuscriptVersion, RelatedContent};

const ELIFE_ARTICLES_URL: &str = "https://elifesciences.org/articles/";
const ELIFE_COLLECTIONS_URL: &str = "https://elifesciences.org/collections/";
const ELIFE_PODCAST_URL: &str = "https://elifesciences.org/podcast/episode";
const HYPOTHESIS_URL: &str = "https://hypothes.is/a/";
const SCIETY_ACTIVITY_URL: &str = "https://sciety.org/articles/activity/";
const SCIETY_EVALUATIONS_URL: &str = "https://sciety.org/evaluations/hypothesis:";

/// A step input: something an editorial transition consumed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Input {
    Preprint(PreprintInput),
    Evaluation(EvaluationInput),
    ElifeManuscript(ElifeManuscriptInput),
}

/// A step output: something an action produced.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Output {
    Preprint(PreprintOutput),
    ElifeManuscript(ElifeManuscriptOutput),
    VersionOfRecord(VorOutput),
    Evaluation(EvaluationOutput),
}

#[derive(Debug, Clone, Serialize)]
pub struct PreprintInput {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub doi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "versionIdentifier", skip_serializing_if = "Option::is_none")]
    pub version_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<chrono::NaiveDate>,
    #[serde(rename = "_tdmPath", skip_serializing_if = "Option::is_none")]
    pub tdm_path: Option<String>,
}

/// Bare preprint input for cross-step references.
pub fn preprint_input(version: &ManuscriptVersion) -> PreprintInput {
    PreprintInput {
        item_type: "preprint",
        doi: version.preprint_doi.clone(),
        url: Some(version.preprint_url.clone()),
        version_identifier: Some(version.preprint_version.clone()),
        published: None,
        tdm_path: None,
    }
}

/// Preprint input for under-review steps, carrying the publication
/// date and the text-and-data-mining path.
pub fn preprint_input_with_published(version: &ManuscriptVersion) -> PreprintInput {
    PreprintInput {
        published: version.preprint_published_at_date,
        tdm_path: version.meca_path.clone(),
        ..preprint_input(version)
    }
}

/// DOI-only preprint input (Kotahi peer-reviewed steps).
pub fn preprint_input_doi_only(version: &ManuscriptVersion) -> PreprintInput {
    PreprintInput {
        item_type: "preprint",
        doi: version.preprint_doi.clone(),
        url: None,
        version_identifier: None,
        published: None,
        tdm_path: None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationInput {
    #[serde(rename = "type")]
    pub item_type: EvaluationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElifeManuscriptInput {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub doi: String,
    pub identifier: String,
    #[serde(rename = "versionIdentifier")]
    pub version_identifier: String,
}

/// The publisher-side manuscript version as a step input (consumed by
/// vor-published steps).
pub fn elife_manuscript_input(
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> ElifeManuscriptInput {
    ElifeManuscriptInput {
        item_type: "preprint",
        doi: identifiers::preprint_version_doi(elife_doi, &version.elife_doi_version_str),
        identifier: record.manuscript_id.clone(),
        version_identifier: version.elife_doi_version_str.clone(),
    }
}

/// Preprint output: the preprint input fields plus `published` and the
/// text-and-data-mining path.
#[derive(Debug, Clone, Serialize)]
pub struct PreprintOutput {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub doi: String,
    pub url: String,
    #[serde(rename = "versionIdentifier")]
    pub version_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<chrono::NaiveDate>,
    #[serde(rename = "_tdmPath", skip_serializing_if = "Option::is_none")]
    pub tdm_path: Option<String>,
}

pub fn preprint_output(version: &ManuscriptVersion) -> PreprintOutput {
    PreprintOutput {
        item_type: "preprint",
        doi: version.preprint_doi.clone(),
        url: version.preprint_url.clone(),
        version_identifier: version.preprint_version.clone(),
        published: version.preprint_published_at_date,
        tdm_path: version.meca_path.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ElifeManuscriptOutput {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub doi: String,
    pub identifier: String,
    #[serde(rename = "versionIdentifier")]
    pub version_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(rename = "partOf", skip_serializing_if = "Option::is_none")]
    pub part_of: Option<PartOf>,
}

/// The publisher-side manuscript output used by under-review and
/// revised steps.
pub fn elife_manuscript_output(
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> ElifeManuscriptOutput {
    ElifeManuscriptOutput {
        item_type: "preprint",
        doi: identifiers::preprint_version_doi(elife_doi, &version.elife_doi_version_str),
        identifier: record.manuscript_id.clone(),
        version_identifier: version.elife_doi_version_str.clone(),
        license: record.license.clone(),
        published: None,
        part_of: None,
    }
}

/// The manuscript output for manuscript-published steps: the base
/// output plus the reviewed-preprint publication instant and the
/// `partOf` section.
pub fn elife_manuscript_published_output(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> ElifeManuscriptOutput {
    ElifeManuscriptOutput {
        published: version
            .rp_publication_timestamp
            .map(|timestamp| timestamp.to_rfc3339()),
        part_of: Some(part_of_section(config, record, version, elife_doi)),
        ..elife_manuscript_output(record, version, elife_doi)
    }
}

/// The `partOf` section aggregating journal-level placement: subject
/// disciplines, volume, electronic article id, and related content.
#[derive(Debug, Clone, Serialize)]
pub struct PartOf {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub doi: String,
    pub identifier: String,
    #[serde(rename = "subjectDisciplines")]
    pub subject_disciplines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(rename = "volumeIdentifier", skip_serializing_if = "Option::is_none")]
    pub volume_identifier: Option<String>,
    #[serde(rename = "electronicArticleIdentifier")]
    pub electronic_article_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<Vec<Complement>>,
}

fn part_of_section(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> PartOf {
    // Volume and journal publication instant come from the first
    // version's reviewed-preprint publication, not this version's.
    let first_publication = record
        .manuscript_versions
        .first()
        .and_then(|first| first.rp_publication_timestamp);

    PartOf {
        item_type: "manuscript",
        doi: elife_doi.to_string(),
        identifier: record.manuscript_id.clone(),
        subject_disciplines: version.subject_areas.clone(),
        published: first_publication.map(|timestamp| timestamp.to_rfc3339()),
        volume_identifier: first_publication
            .and_then(|timestamp| {
                use chrono::Datelike;
                identifiers::volume_identifier(config, timestamp.year())
            }),
        electronic_article_identifier: identifiers::electronic_article_identifier(
            &record.manuscript_id,
        ),
        complement: related_content_complements(record),
    }
}

/// One related article, collection, or podcast chapter in `partOf`.
#[derive(Debug, Clone, Serialize)]
pub struct Complement {
    #[serde(rename = "type")]
    pub item_type: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Camel-case a manuscript type: lowercase first word, CamelCased
/// subsequent words (`"Research Article"` becomes `"researchArticle"`).
fn complement_type(manuscript_type: &str) -> String {
    let mut words = manuscript_type.split_whitespace();
    let mut out = match words.next() {
        Some(first) => first.to_lowercase(),
        None => return String::new(),
    };
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

fn complement(entry: &RelatedContent) -> Option<Complement> {
    if let (Some(id), Some(manuscript_type)) = (&entry.manuscript_id, &entry.manuscript_type) {
        return Some(Complement {
            item_type: complement_type(manuscript_type),
            url: format!("{ELIFE_ARTICLES_URL}{id}"),
            title: entry.manuscript_title.clone(),
            description: entry.manuscript_authors_csv.clone(),
            thumbnail: None,
        });
    }
    if let Some(id) = &entry.collection_id {
        let description = entry.collection_curator_name.as_ref().map(|curator| {
            if entry.is_collection_curator_et_al {
                format!("Edited by {curator} et al")
            } else {
                format!("Edited by {curator}")
            }
        });
        return Some(Complement {
            item_type: "collection".to_string(),
            url: format!("{ELIFE_COLLECTIONS_URL}{id}/meta-research-a-collection-of-articles"),
            title: entry.collection_title.clone(),
            description,
            thumbnail: entry.collection_thumbnail_url.clone(),
        });
    }
    if let (Some(id), Some(chapter_time)) = (entry.podcast_id, entry.podcast_chapter_time) {
        return Some(Complement {
            item_type: "podcastChapterEpisode".to_string(),
            url: format!("{ELIFE_PODCAST_URL}{id}#{chapter_time}"),
            title: entry.podcast_chapter_title.clone(),
            description: None,
            thumbnail: None,
        });
    }
    tracing::debug!("related content entry matches no branch, dropping");
    None
}

/// Related-content complements, sorted by `url` ascending (stable, so
/// output stays byte-identical across runs).
pub fn related_content_complements(record: &ManuscriptRecord) -> Option<Vec<Complement>> {
    record.related_content.as_ref().map(|entries| {
        let mut complements: Vec<Complement> = entries.iter().filter_map(complement).collect();
        complements.sort_by(|a, b| a.url.cmp(&b.url));
        complements
    })
}

/// Version-of-record output.
#[derive(Debug, Clone, Serialize)]
pub struct VorOutput {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub doi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<chrono::NaiveDate>,
    pub url: String,
    pub content: Vec<Content>,
}

pub fn vor_output(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    vor_doi: &str,
) -> VorOutput {
    VorOutput {
        item_type: "version-of-record",
        doi: vor_doi.to_string(),
        published: version.vor_publication_date,
        url: identifiers::doi_url(config, vor_doi),
        content: vec![Content {
            content_type: "web-page",
            url: format!("{ELIFE_ARTICLES_URL}{}", record.manuscript_id),
        }],
    }
}

/// An evaluation as a step output.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutput {
    #[serde(rename = "type")]
    pub item_type: EvaluationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub content: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub url: String,
}

/// Evaluation output for a structured (public variant) evaluation:
/// three web pages in fixed order (Hypothes.is annotation, Sciety
/// activity anchor, Sciety evaluation content).
pub fn evaluation_output(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    evaluation: &crate::record::Evaluation,
    evaluation_type: EvaluationType,
    evaluation_doi: &str,
) -> EvaluationOutput {
    EvaluationOutput {
        item_type: evaluation_type,
        published: Some(evaluation.annotation_created_timestamp.to_rfc3339()),
        doi: Some(evaluation_doi.to_string()),
        identifier: None,
        license: record.license.clone(),
        url: Some(identifiers::doi_url(config, evaluation_doi)),
        content: vec![
            Content {
                content_type: "web-page",
                url: format!("{HYPOTHESIS_URL}{}", evaluation.hypothesis_id),
            },
            Content {
                content_type: "web-page",
                url: format!(
                    "{SCIETY_ACTIVITY_URL}{}#hypothesis:{}",
                    version.preprint_doi, evaluation.hypothesis_id
                ),
            },
            Content {
                content_type: "web-page",
                url: format!("{SCIETY_EVALUATIONS_URL}{}/content", evaluation.hypothesis_id),
            },
        ],
    }
}

/// Evaluation output for an email-derived (Kotahi) section: no DOI,
/// the synthesized identifier, and one web-content entry pointing at
/// the service's own evaluation endpoint.
pub fn email_evaluation_output(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    evaluation_type: EvaluationType,
    evaluation_id: &str,
) -> EvaluationOutput {
    EvaluationOutput {
        item_type: evaluation_type,
        published: version
            .email_timestamp
            .map(|timestamp| timestamp.to_rfc3339()),
        doi: None,
        identifier: Some(evaluation_id.to_string()),
        license: record.license.clone(),
        url: None,
        content: vec![Content {
            content_type: "web-content",
            url: format!(
                "{}{}",
                config.kotahi_evaluation_url_prefix,
                urlencoding::encode(evaluation_id)
            ),
        }],
    }
}

/// An assertion item: the thing a status claim is about.
#[derive(Debug, Clone, Serialize)]
pub struct AssertionItem {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub doi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "versionIdentifier")]
    pub version_identifier: String,
}

/// The posted preprint as an assertion item.
pub fn preprint_assertion_item(version: &ManuscriptVersion) -> AssertionItem {
    AssertionItem {
        item_type: "preprint",
        doi: version.preprint_doi.clone(),
        identifier: None,
        version_identifier: version.preprint_version.clone(),
    }
}

/// The publisher-side manuscript version as an assertion item.
pub fn elife_manuscript_assertion_item(
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> AssertionItem {
    AssertionItem {
        item_type: "preprint",
        doi: identifiers::preprint_version_doi(elife_doi, &version.elife_doi_version_str),
        identifier: Some(record.manuscript_id.clone()),
        version_identifier: version.elife_doi_version_str.clone(),
    }
}

/// The version of record as an assertion item; `vor_version` is the
/// incremented version string that also suffixes the VOR DOI.
pub fn vor_assertion_item(
    record: &ManuscriptRecord,
    vor_doi: &str,
    vor_version: &str,
) -> AssertionItem {
    AssertionItem {
        item_type: "version-of-record",
        doi: vor_doi.to_string(),
        identifier: Some(record.manuscript_id.clone()),
        version_identifier: vor_version.to_string(),
    }
}
