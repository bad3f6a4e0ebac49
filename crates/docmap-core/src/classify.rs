//! Evaluation classification from tag sets.
//!
//! Matching is substring-based: a tag `PeerReview` contains the
//! fragment `Review`, so it classifies as a review article.

use serde::Serialize;

use crate::error::DocmapError;

/// The three kinds of evaluation a Docmap action can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvaluationType {
    #[serde(rename = "evaluation-summary")]
    EvaluationSummary,
    #[serde(rename = "review-article")]
    ReviewArticle,
    #[serde(rename = "reply")]
    Reply,
}

impl EvaluationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationType::EvaluationSummary => "evaluation-summary",
            EvaluationType::ReviewArticle => "review-article",
            EvaluationType::Reply => "reply",
        }
    }
}

/// Classify a set of tags, checked in order:
///
/// 1. `AuthorResponse` together with `Summary` is a hard error;
/// 2. `AuthorResponse` is a reply;
/// 3. `Summary` is an evaluation summary;
/// 4. `Review` is a review article;
/// 5. anything else is unclassified (`Ok(None)`), and the evaluation
///    is dropped by the caller.
pub fn classify_tags(tags: &[String]) -> Result<Option<EvaluationType>, DocmapError> {
    let has = |fragment: &str| tags.iter().any(|tag| tag.contains(fragment));

    let author_response = has("AuthorResponse");
    let summary = has("Summary");
    if author_response && summary {
        return Err(DocmapError::ConflictingTags);
    }
    if author_response {
        return Ok(Some(EvaluationType::Reply));
    }
    if summary {
        return Ok(Some(EvaluationType::EvaluationSummary));
    }
    if has("Review") {
        return Ok(Some(EvaluationType::ReviewArticle));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(&["PeerReview"], EvaluationType::ReviewArticle)]
    #[case(&["PeerReview", "evaluationSummary"], EvaluationType::EvaluationSummary)]
    #[case(&["PeerReview", "AuthorResponse"], EvaluationType::Reply)]
    #[case(&["AuthorResponse"], EvaluationType::Reply)]
    fn classifies_by_substring(#[case] input: &[&str], #[case] expected: EvaluationType) {
        assert_eq!(classify_tags(&tags(input)).unwrap(), Some(expected));
    }

    #[test]
    fn unknown_tags_are_unclassified() {
        assert_eq!(classify_tags(&tags(&["Curation"])).unwrap(), None);
        assert_eq!(classify_tags(&[]).unwrap(), None);
    }

    #[test]
    fn author_response_with_summary_conflicts() {
        assert!(matches!(
            classify_tags(&tags(&["AuthorResponse", "Summary"])),
            Err(DocmapError::ConflictingTags)
        ));
    }

    #[test]
    fn type_strings_match_vocabulary() {
        assert_eq!(EvaluationType::EvaluationSummary.as_str(), "evaluation-summary");
        assert_eq!(EvaluationType::ReviewArticle.as_str(), "review-article");
        assert_eq!(EvaluationType::Reply.as_str(), "reply");
    }
}
