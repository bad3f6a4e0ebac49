//! Evaluation extraction from editorial emails (Kotahi variant).
//!
//! The editorial workflow sends one email per version whose body
//! carries an "eLife assessment" block and a "Public Reviews" block,
//! separated by horizontal rules. The markers are stable; everything
//! else in the body is free text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::classify::EvaluationType;

const ASSESSMENT_HEADER: &str = "eLife assessment";
const PUBLIC_REVIEWS_HEADER: &str = "Public Reviews";
const PUBLIC_REVIEW_MARKER: &str = "Public Review";
const HORIZONTAL_RULE: &str = "----------";

lazy_static! {
    // Per-reviewer header, e.g. "Reviewer #2 (Public Review):",
    // tolerant of trailing whitespace around the colon.
    static ref REVIEWER_HEADER: Regex =
        Regex::new(r"(?m)^Reviewer\s+#\d+\s*\(Public Review\)\s*:[ \t]*").unwrap();
}

/// One evaluation section extracted from an email body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationEmailSection {
    /// Only `EvaluationSummary` or `ReviewArticle` can occur here;
    /// author replies never arrive by email.
    pub evaluation_type: EvaluationType,
    pub evaluation_text: String,
    /// 1-based emission order within the version.
    pub ordinal: u32,
}

impl EvaluationEmailSection {
    /// Stable identifier for this section:
    /// `long_manuscript_identifier + "/" + evaluation_type + "/" + ordinal`.
    pub fn evaluation_id(&self, long_manuscript_identifier: &str) -> String {
        format!(
            "{long_manuscript_identifier}/{}/{}",
            self.evaluation_type.as_str(),
            self.ordinal
        )
    }
}

/// Extract the eLife assessment block: bounded by the literal
/// `eLife assessment` header and the next horizontal rule or
/// `Public Review` marker, whichever comes first. Whitespace-trimmed;
/// absent or empty yields `None`.
pub fn parse_elife_assessment(email_body: &str) -> Option<String> {
    let start = email_body.find(ASSESSMENT_HEADER)? + ASSESSMENT_HEADER.len();
    let rest = &email_body[start..];
    let end = [rest.find(HORIZONTAL_RULE), rest.find(PUBLIC_REVIEW_MARKER)]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());
    let text = rest[..end].trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Extract the per-reviewer public reviews: the block bounded by the
/// `Public Reviews` header and the next horizontal rule, split by the
/// per-reviewer header. A block containing the header but no review
/// bodies yields `None`.
pub fn parse_public_reviews(email_body: &str) -> Option<Vec<String>> {
    let start = email_body.find(PUBLIC_REVIEWS_HEADER)? + PUBLIC_REVIEWS_HEADER.len();
    let rest = &email_body[start..];
    let block = &rest[..rest.find(HORIZONTAL_RULE).unwrap_or(rest.len())];

    let headers: Vec<_> = REVIEWER_HEADER.find_iter(block).collect();
    if headers.is_empty() {
        return None;
    }

    let mut reviews = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        let body_end = headers
            .get(i + 1)
            .map(|next| next.start())
            .unwrap_or(block.len());
        let text = block[header.end()..body_end].trim();
        if !text.is_empty() {
            reviews.push(text.to_string());
        }
    }

    if reviews.is_empty() {
        None
    } else {
        Some(reviews)
    }
}

/// Extract every evaluation section from an email body in emission
/// order: the assessment (if present) first, then each public review
/// in the order found. Ordinals are 1-based within the version.
pub fn parse_email_sections(email_body: &str) -> Vec<EvaluationEmailSection> {
    let mut sections = Vec::new();
    let mut ordinal = 0u32;

    if let Some(text) = parse_elife_assessment(email_body) {
        ordinal += 1;
        sections.push(EvaluationEmailSection {
            evaluation_type: EvaluationType::EvaluationSummary,
            evaluation_text: text,
            ordinal,
        });
    }

    if let Some(reviews) = parse_public_reviews(email_body) {
        for text in reviews {
            ordinal += 1;
            sections.push(EvaluationEmailSection {
                evaluation_type: EvaluationType::ReviewArticle,
                evaluation_text: text,
                ordinal,
            });
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "\
Dear authors,

eLife assessment

This important study advances our understanding of flight.
The evidence is compelling.

----------

Public Reviews

Reviewer #1 (Public Review):

A thorough piece of work.

Reviewer #2 (Public Review):

Some concerns about the controls.

----------

Best regards,
The editors
";

    #[test]
    fn assessment_is_extracted_and_trimmed() {
        let assessment = parse_elife_assessment(EMAIL).unwrap();
        assert!(assessment.starts_with("This important study"));
        assert!(assessment.ends_with("compelling."));
    }

    #[test]
    fn assessment_stops_at_public_review_marker_without_rule() {
        let body = "eLife assessment\nGood.\nPublic Reviews\nReviewer #1 (Public Review):\nFine.";
        assert_eq!(parse_elife_assessment(body), Some("Good.".to_string()));
    }

    #[test]
    fn assessment_absent_yields_none() {
        assert_eq!(parse_elife_assessment("no markers here"), None);
        assert_eq!(parse_elife_assessment("eLife assessment\n\n----------"), None);
    }

    #[test]
    fn public_reviews_are_split_per_reviewer() {
        let reviews = parse_public_reviews(EMAIL).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0], "A thorough piece of work.");
        assert_eq!(reviews[1], "Some concerns about the controls.");
    }

    #[test]
    fn reviews_block_without_bodies_yields_none() {
        let body = "Public Reviews\n\nReviewer #1 (Public Review):\n\n----------";
        assert_eq!(parse_public_reviews(body), None);
    }

    #[test]
    fn reviews_block_without_headers_yields_none() {
        let body = "Public Reviews\n\njust prose\n\n----------";
        assert_eq!(parse_public_reviews(body), None);
    }

    #[test]
    fn sections_emit_summary_first_with_dense_ordinals() {
        let sections = parse_email_sections(EMAIL);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].evaluation_type, EvaluationType::EvaluationSummary);
        assert_eq!(sections[0].ordinal, 1);
        assert_eq!(sections[1].evaluation_type, EvaluationType::ReviewArticle);
        assert_eq!(sections[1].ordinal, 2);
        assert_eq!(sections[2].ordinal, 3);
    }

    #[test]
    fn evaluation_id_is_synthesized_from_type_and_ordinal() {
        let sections = parse_email_sections(EMAIL);
        assert_eq!(
            sections[0].evaluation_id("eLife-RP-85111"),
            "eLife-RP-85111/evaluation-summary/1"
        );
        assert_eq!(
            sections[1].evaluation_id("eLife-RP-85111"),
            "eLife-RP-85111/review-article/2"
        );
    }
}
