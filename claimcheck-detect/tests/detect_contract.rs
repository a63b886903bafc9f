mod common;

use claimcheck_detect::{CheckError, Claim, DetectClient, Detector, VerdictLabel};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn claim(text: &str) -> Claim {
    Claim::parse(text).expect("non-empty claim")
}

#[tokio::test]
async fn sends_trimmed_claim_and_decodes_verdict() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "claim": "The moon is made of cheese" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verdict": "False",
            "explanation": "No evidence supports this.",
            "search_query": "moon composition",
            "sources": ["nasa.gov"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DetectClient::new(&server.uri()).unwrap();
    let verdict = client
        .detect(&claim("  The moon is made of cheese  "))
        .await
        .unwrap();

    assert_eq!(verdict.verdict, "False");
    assert_eq!(verdict.explanation, "No evidence supports this.");
    assert_eq!(verdict.search_query, "moon composition");
    assert_eq!(verdict.sources, vec!["nasa.gov".to_string()]);
}

#[tokio::test]
async fn unverifiable_answer_with_no_sources() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verdict": "Unverifiable",
            "explanation": "No relevant sources found",
            "sources": [],
            "search_query": "obscure event"
        })))
        .mount(&server)
        .await;

    let client = DetectClient::new(&server.uri()).unwrap();
    let verdict = client.detect(&claim("obscure event happened")).await.unwrap();

    assert_eq!(verdict.label(), VerdictLabel::Unverifiable);
    assert!(verdict.sources.is_empty());
}

#[tokio::test]
async fn server_error_surfaces_status_and_body() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = DetectClient::new(&server.uri()).unwrap();
    let err = client.detect(&claim("anything")).await.unwrap_err();

    assert_eq!(
        err,
        CheckError::Status {
            status: 500,
            body: "internal error".into()
        }
    );
}

#[tokio::test]
async fn json_error_envelope_is_kept_verbatim() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    let body = r#"{"error":"Tavily error: timeout","search_query":"aliens nasa"}"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string(body))
        .mount(&server)
        .await;

    let client = DetectClient::new(&server.uri()).unwrap();
    let err = client.detect(&claim("NASA confirms aliens")).await.unwrap_err();

    match err {
        CheckError::Status { status, body: got } => {
            assert_eq!(status, 502);
            assert_eq!(got, body);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn custom_path_is_honoured() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "raw": "unparsed" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DetectClient::new(&server.uri())
        .unwrap()
        .with_path("api/detect");
    let verdict = client.detect(&claim("x")).await.unwrap();

    assert_eq!(verdict.raw.as_deref(), Some("unparsed"));
    assert_eq!(verdict.label(), VerdictLabel::Missing);
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    common::init_test_tracing();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = DetectClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let err = client.detect(&claim("x")).await.unwrap_err();

    match err {
        CheckError::Transport(msg) => assert!(!msg.is_empty()),
        other => panic!("expected transport error, got {other:?}"),
    }
}
