//! Step builders: one constructor per step kind, each assembling the
//! `{inputs, assertions, actions}` triple from fragments.

use serde::Serialize;

use crate::classify::EvaluationType;
use crate::config::DocmapConfig;
use crate::error::DocmapError;
use crate::fragments::{
    self, AssertionItem, EvaluationInput, EvaluationOutput, Input, Output,
};
use crate::identifiers;
use crate::participants::{self, Participant};
use crate::record::{ManuscriptRecord, ManuscriptVersion};
use crate::sequence::Flavor;

/// One editorial transition: inputs consumed, status assertions, and
/// the actions performed. The `previous-step`/`next-step` links are
/// threaded by the sequencer after all steps are collected.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub inputs: Vec<Input>,
    pub assertions: Vec<Assertion>,
    pub actions: Vec<Action>,
    #[serde(rename = "previous-step", skip_serializing_if = "Option::is_none")]
    pub previous_step: Option<String>,
    #[serde(rename = "next-step", skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
}

/// A status claim about an item, optionally timestamped.
#[derive(Debug, Clone, Serialize)]
pub struct Assertion {
    pub item: AssertionItem,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub happened: Option<String>,
}

/// A performed operation: participants involved and outputs produced.
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub participants: Vec<Participant>,
    pub outputs: Vec<Output>,
}

/// One classified evaluation of a version, ready to become an action
/// and (at later versions) a step input.
#[derive(Debug, Clone)]
pub struct ClassifiedEvaluation {
    pub evaluation_type: EvaluationType,
    pub participants: Vec<Participant>,
    pub output: EvaluationOutput,
    pub input: EvaluationInput,
}

impl ClassifiedEvaluation {
    fn into_action(self) -> Action {
        Action {
            participants: self.participants,
            outputs: vec![Output::Evaluation(self.output)],
        }
    }
}

fn evaluation_actions(evaluations: &[ClassifiedEvaluation]) -> Vec<Action> {
    evaluations
        .iter()
        .cloned()
        .map(ClassifiedEvaluation::into_action)
        .collect()
}

fn evaluation_inputs(evaluations: &[ClassifiedEvaluation]) -> Vec<Input> {
    evaluations
        .iter()
        .map(|evaluation| Input::Evaluation(evaluation.input.clone()))
        .collect()
}

/// The version was taken under review: preprint input with publication
/// date, an `under-review` assertion (timestamped, empty string when
/// the timestamp is absent) plus a `draft` assertion for the
/// publisher-side manuscript, and the draft manuscript as output.
pub fn under_review_step(
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> Step {
    Step {
        inputs: vec![Input::Preprint(fragments::preprint_input_with_published(
            version,
        ))],
        assertions: vec![
            Assertion {
                item: fragments::preprint_assertion_item(version),
                status: "under-review",
                happened: Some(
                    version
                        .under_review_timestamp
                        .map(|timestamp| timestamp.to_rfc3339())
                        .unwrap_or_default(),
                ),
            },
            Assertion {
                item: fragments::elife_manuscript_assertion_item(record, version, elife_doi),
                status: "draft",
                happened: None,
            },
        ],
        actions: vec![Action {
            participants: vec![],
            outputs: vec![Output::ElifeManuscript(fragments::elife_manuscript_output(
                record, version, elife_doi,
            ))],
        }],
        previous_step: None,
        next_step: None,
    }
}

/// The first version was peer-reviewed: one action per evaluation,
/// order-preserved from the source list.
pub fn peer_reviewed_step(
    flavor: Flavor,
    version: &ManuscriptVersion,
    evaluations: &[ClassifiedEvaluation],
) -> Step {
    let preprint = match flavor {
        Flavor::Public => fragments::preprint_input(version),
        Flavor::Kotahi => fragments::preprint_input_doi_only(version),
    };
    Step {
        inputs: vec![Input::Preprint(preprint)],
        assertions: vec![Assertion {
            item: fragments::preprint_assertion_item(version),
            status: "peer-reviewed",
            happened: None,
        }],
        actions: evaluation_actions(evaluations),
        previous_step: None,
        next_step: None,
    }
}

/// A later version was revised: this version's preprint plus the
/// previous version's evaluations as inputs; the draft manuscript
/// output followed by this version's evaluation actions.
pub fn revised_step(
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
    evaluations: &[ClassifiedEvaluation],
    previous_evaluations: &[ClassifiedEvaluation],
) -> Step {
    let mut inputs = vec![Input::Preprint(fragments::preprint_input(version))];
    inputs.extend(evaluation_inputs(previous_evaluations));

    let mut actions = vec![Action {
        participants: vec![],
        outputs: vec![Output::ElifeManuscript(fragments::elife_manuscript_output(
            record, version, elife_doi,
        ))],
    }];
    actions.extend(evaluation_actions(evaluations));

    Step {
        inputs,
        assertions: vec![Assertion {
            item: fragments::elife_manuscript_assertion_item(record, version, elife_doi),
            status: "revised",
            happened: None,
        }],
        actions,
        previous_step: None,
        next_step: None,
    }
}

/// The reviewed preprint was published: the manuscript output carries
/// the publication instant and the `partOf` section. Kotahi also lists
/// the version's evaluations as inputs.
pub fn manuscript_published_step(
    config: &DocmapConfig,
    flavor: Flavor,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
    evaluations: &[ClassifiedEvaluation],
) -> Step {
    let mut inputs = vec![Input::Preprint(fragments::preprint_input(version))];
    if flavor == Flavor::Kotahi {
        inputs.extend(evaluation_inputs(evaluations));
    }

    Step {
        inputs,
        assertions: vec![Assertion {
            item: fragments::elife_manuscript_assertion_item(record, version, elife_doi),
            status: "manuscript-published",
            happened: None,
        }],
        actions: vec![Action {
            participants: vec![],
            outputs: vec![Output::ElifeManuscript(
                fragments::elife_manuscript_published_output(config, record, version, elife_doi),
            )],
        }],
        previous_step: None,
        next_step: None,
    }
}

/// The version of record was published: consumes the immediately
/// previous version's manuscript, produces the VOR output with its
/// incremented DOI.
pub fn vor_published_step(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    previous: &ManuscriptVersion,
    elife_doi: &str,
) -> Result<Step, DocmapError> {
    let vor_version = identifiers::vor_version_str(&version.elife_doi_version_str)?;
    let vor_doi = identifiers::preprint_version_doi(elife_doi, &vor_version);
    Ok(Step {
        inputs: vec![Input::ElifeManuscript(fragments::elife_manuscript_input(
            record, previous, elife_doi,
        ))],
        assertions: vec![Assertion {
            item: fragments::vor_assertion_item(record, &vor_doi, &vor_version),
            status: "vor-published",
            happened: None,
        }],
        actions: vec![Action {
            participants: vec![],
            outputs: vec![Output::VersionOfRecord(fragments::vor_output(
                config, record, version, &vor_doi,
            ))],
        }],
        previous_step: None,
        next_step: None,
    })
}

/// Classify a version's evaluations for the given flavor, preserving
/// source order.
///
/// Public: structured evaluation records, filtered to those whose
/// `uri` matches the version's preprint URL; unclassifiable tag sets
/// are dropped with a debug trace; conflicting tags abort the record.
///
/// Kotahi: sections parsed from the version's email body; the
/// assessment becomes an evaluation summary, each public review a
/// review article.
pub fn classify_version_evaluations(
    config: &DocmapConfig,
    flavor: Flavor,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> Result<Vec<ClassifiedEvaluation>, DocmapError> {
    match flavor {
        Flavor::Public => structured_evaluations(config, record, version, elife_doi),
        Flavor::Kotahi => Ok(email_evaluations(config, record, version)),
    }
}

fn structured_evaluations(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
    elife_doi: &str,
) -> Result<Vec<ClassifiedEvaluation>, DocmapError> {
    let version_doi =
        identifiers::preprint_version_doi(elife_doi, &version.elife_doi_version_str);
    let mut classified = Vec::new();

    for evaluation in &version.evaluations {
        if evaluation.uri != version.preprint_url {
            tracing::debug!(
                hypothesis_id = %evaluation.hypothesis_id,
                uri = %evaluation.uri,
                "evaluation uri does not match version preprint url, skipping"
            );
            continue;
        }
        let Some(evaluation_type) = crate::classify::classify_tags(&evaluation.tags)? else {
            tracing::debug!(
                hypothesis_id = %evaluation.hypothesis_id,
                "evaluation tags are unclassifiable, skipping"
            );
            continue;
        };

        let doi = identifiers::evaluation_doi(&version_doi, &evaluation.evaluation_suffix);
        classified.push(ClassifiedEvaluation {
            evaluation_type,
            participants: participants_for(evaluation_type, version),
            output: fragments::evaluation_output(
                config,
                record,
                version,
                evaluation,
                evaluation_type,
                &doi,
            ),
            input: EvaluationInput {
                item_type: evaluation_type,
                doi: Some(doi),
                identifier: None,
            },
        });
    }

    Ok(classified)
}

fn email_evaluations(
    config: &DocmapConfig,
    record: &ManuscriptRecord,
    version: &ManuscriptVersion,
) -> Vec<ClassifiedEvaluation> {
    let Some(body) = version.email_body.as_deref() else {
        tracing::debug!(
            long_manuscript_identifier = %version.long_manuscript_identifier,
            "version has no email body, no evaluations emitted"
        );
        return vec![];
    };

    crate::email::parse_email_sections(body)
        .into_iter()
        .map(|section| {
            let evaluation_id = section.evaluation_id(&version.long_manuscript_identifier);
            ClassifiedEvaluation {
                evaluation_type: section.evaluation_type,
                participants: participants_for(section.evaluation_type, version),
                output: fragments::email_evaluation_output(
                    config,
                    record,
                    version,
                    section.evaluation_type,
                    &evaluation_id,
                ),
                input: EvaluationInput {
                    item_type: section.evaluation_type,
                    doi: None,
                    identifier: Some(evaluation_id),
                },
            }
        })
        .collect()
}

fn participants_for(
    evaluation_type: EvaluationType,
    version: &ManuscriptVersion,
) -> Vec<Participant> {
    match evaluation_type {
        EvaluationType::ReviewArticle => vec![participants::anonymous_reviewer()],
        EvaluationType::EvaluationSummary => {
            participants::evaluation_summary_participants(version)
        }
        EvaluationType::Reply => vec![],
    }
}
