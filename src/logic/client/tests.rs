use super::*;
use crate::logic::test_support::{client_for, history_body, models_body, report_body};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_models_decodes_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(models_body()))
        .mount(&server)
        .await;

    let catalog = client_for(&server).list_models().await.unwrap();

    assert_eq!(catalog.latest.as_deref(), Some("1.2"));
    assert_eq!(catalog.models.len(), 2);
    assert_eq!(catalog.find("1.0").unwrap().name, "MLK2 Initial Model");
}

#[tokio::test]
async fn test_predict_sends_title_version_and_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict/"))
        .and(body_json(json!({
            "judul": "Aplikasi kasir berbasis web",
            "model_version": "1.2",
            "session_id": "sess-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_kbk": "Software",
            "probabilities": {"Software": 0.9, "Jaringan": 0.1},
            "model_version": "1.2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .predict("Aplikasi kasir berbasis web", Some("1.2"), Some("sess-1"))
        .await
        .unwrap();

    assert_eq!(result.predicted_kbk, "Software");
    assert_eq!(result.model_version, "1.2");
}

#[tokio::test]
async fn test_predict_omits_empty_model_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict/"))
        .and(body_json(json!({"judul": "x", "session_id": "s"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_kbk": "Software",
            "probabilities": {"Software": 1.0},
            "model_version": "1.2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).predict("x", Some(""), Some("s")).await.unwrap();
}

#[tokio::test]
async fn test_history_filters_by_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/"))
        .and(query_param("session_id", "sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body()))
        .mount(&server)
        .await;

    let entries = client_for(&server).history("sess-1").await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "h-2");
}

#[tokio::test]
async fn test_clear_history_posts_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/history/clear/"))
        .and(body_json(json!({"session_id": "sess-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "deleted": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server).clear_history("sess-1").await.unwrap();
    assert_eq!(ack.deleted, Some(2));
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/h-1/"))
        .and(query_param("session_id", "sess-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server).delete_history("sess-1", "h-1").await.unwrap();
    assert!(ack.success.is_none());
}

#[tokio::test]
async fn test_delete_encodes_id_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/h-2%3Fx=1/"))
        .and(query_param("session_id", "sess-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/a%2Fb/"))
        .and(query_param("session_id", "sess-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_history("sess-1", "h-2?x=1").await.unwrap();
    client.delete_history("sess-1", "a/b").await.unwrap();
}

#[tokio::test]
async fn test_delete_rejects_dot_segment_ids() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for id in ["..", "."] {
        let err = client.delete_history("sess-1", id).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}

#[tokio::test]
async fn test_analyze_passes_model_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analyze/"))
        .and(query_param("model_version", "1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_body()))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server).analyze(Some("1.0")).await.unwrap();
    assert_eq!(report.total_samples, Some(420));
    let keys: Vec<_> = report.class_distribution.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["AI / Machine Learning", "Software"]);
}

#[tokio::test]
async fn test_error_field_in_ok_response_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analyze/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Model not trained yet"})))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(None).await.unwrap_err();
    assert_eq!(err, ApiError::Backend("Model not trained yet".to_string()));
}

#[tokio::test]
async fn test_non_success_status_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Judul is required"})))
        .mount(&server)
        .await;

    let err = client_for(&server).predict("t", None, None).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server { status: 400, body: "Judul is required".to_string() }
    );
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_models().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let config = DashboardConfig::default().with_api_url("http://127.0.0.1:1");
    let client = ApiClient::new(&config).unwrap();

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_train_posts_and_reads_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/train/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Training started"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).train().await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Training started"));
}
