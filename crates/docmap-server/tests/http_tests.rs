//! HTTP surface tests against an in-memory manuscript source.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use docmap_core::{ManuscriptRecord, ManuscriptVersion};
use docmap_server::source::StaticSource;
use docmap_server::{create_router, AppState};

const EMAIL: &str = "\
eLife assessment

A landmark study.

----------

Public Reviews

Reviewer #1 (Public Review):

Convincing & thorough.

----------
";

fn version(kotahi: bool) -> ManuscriptVersion {
    ManuscriptVersion {
        long_manuscript_identifier: "eLife-RP-7".to_string(),
        position_in_overall_stage: 1,
        qc_complete_timestamp: "2023-01-02T03:04:05+00:00".parse().expect("timestamp"),
        under_review_timestamp: None,
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
        email_body: kotahi.then(|| EMAIL.to_string()),
        email_timestamp: None,
    }
}

fn record(manuscript_id: &str, reviewed_preprint: bool) -> ManuscriptRecord {
    ManuscriptRecord {
        publisher_json: serde_json::json!({"id": "https://elifesciences.org/"}),
        manuscript_id: manuscript_id.to_string(),
        elife_doi: Some(format!("10.7554/eLife.{manuscript_id}")),
        license: None,
        is_reviewed_preprint_type: reviewed_preprint,
        manuscript_versions: vec![version(!reviewed_preprint)],
        related_content: None,
    }
}

fn router() -> axum::Router {
    let source = StaticSource::new(vec![record("1", true), record("2", false)]);
    let state = Arc::new(AppState::new(Box::new(source), Duration::from_secs(60)));
    create_router(state)
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn public_index_lists_reviewed_preprints() {
    let (status, body) = get_json("/enhanced-preprints/docmaps/v2/index").await;
    assert_eq!(status, StatusCode::OK);
    let docmaps = body["docmaps"].as_array().unwrap();
    assert_eq!(docmaps.len(), 1);
    assert_eq!(docmaps[0]["type"], "docmap");
}

#[tokio::test]
async fn public_by_manuscript_id_returns_single_docmap() {
    let (status, body) = get_json(
        "/enhanced-preprints/docmaps/v2/by-publisher/elife/get-by-manuscript-id?manuscript_id=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "docmap");
    assert_eq!(body["first-step"], "_:b0");
}

#[tokio::test]
async fn unknown_manuscript_id_is_404_with_fixed_detail() {
    let (status, body) = get_json(
        "/enhanced-preprints/docmaps/v2/by-publisher/elife/get-by-manuscript-id?manuscript_id=99",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["detail"],
        "No Docmaps available for requested manuscript from the publisher eLife"
    );
}

#[tokio::test]
async fn kotahi_index_lists_the_other_records() {
    let (status, body) = get_json("/kotahi/docmaps/v1/index").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docmaps"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn evaluation_text_is_served_as_html() {
    let (status, body) = get(
        "/kotahi/docmaps/v1/evaluation/get-by-evaluation-id?evaluation_id=eLife-RP-7%2Fevaluation-summary%2F1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "<p>A landmark study.</p>");
}

#[tokio::test]
async fn review_text_escapes_entities() {
    let (status, body) = get(
        "/kotahi/docmaps/v1/evaluation/get-by-evaluation-id?evaluation_id=eLife-RP-7%2Freview-article%2F2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "<p>Convincing &amp; thorough.</p>"
    );
}

#[tokio::test]
async fn unknown_evaluation_id_is_404() {
    let (status, _) =
        get("/kotahi/docmaps/v1/evaluation/get-by-evaluation-id?evaluation_id=nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejected_record_surfaces_as_server_error() {
    let mut bad = record("3", true);
    bad.elife_doi = None;
    let source = StaticSource::new(vec![bad]);
    let state = Arc::new(AppState::new(Box::new(source), Duration::from_secs(60)));
    let router = create_router(state);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/enhanced-preprints/docmaps/v2/index")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
