use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes;
use server::state::ServerState;
use service::errors::DeliveryError;
use service::notify::client::mock::RecordingClient;
use service::notify::NotificationDispatcher;
use service::storage::{KvStore, MemoryBackend, StorageBackend, StorageKeys};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

struct TestApp {
    app: Router,
    backend: Arc<MemoryBackend>,
    client: Arc<RecordingClient>,
}

fn build_app_with(client: RecordingClient) -> TestApp {
    let backend = Arc::new(MemoryBackend::new());
    let client = Arc::new(client);
    let store = Arc::new(KvStore::new(backend.clone(), StorageKeys::default()));
    let dispatcher = Arc::new(NotificationDispatcher::new(store.clone(), client.clone()));
    let state = ServerState { store, dispatcher };
    let app = routes::build_router(state, cors(), "/nonexistent-frontend");
    TestApp { app, backend, client }
}

fn build_app() -> TestApp {
    build_app_with(RecordingClient::default())
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Ok((status, value))
}

fn beach_trip() -> Value {
    json!({
        "date": "2024-06-01",
        "time": "10:00",
        "description": "Sortie plage",
        "teamMembers": ["Alice"],
        "jeunes": ["Bob", "Chloé"]
    })
}

fn delivery_config() -> Value {
    json!({"serviceId": "s1", "templateId": "t1", "publicKey": "p1"})
}

fn send_request(recipient: &str) -> Value {
    json!({"recipient": recipient, "event": beach_trip()})
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let t = build_app();
    let (status, body) = call(&t.app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn collection_put_then_get_round_trips() -> anyhow::Result<()> {
    let t = build_app();
    let roster = json!([
        {"id": uuid::Uuid::new_v4(), "firstName": "Bob", "lastName": "Martin", "guardianPhone": "", "notes": ""},
        {
            "id": uuid::Uuid::new_v4(),
            "firstName": "Chloé",
            "lastName": "Durand",
            "birthDate": "2012-06-02",
            "group": "Ados",
            "guardianPhone": "0600000000",
            "notes": "végétarienne"
        }
    ]);

    let (status, _) = call(&t.app, "PUT", "/api/collections/roster", Some(roster.clone())).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&t.app, "GET", "/api/collections/roster", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, roster);
    Ok(())
}

#[tokio::test]
async fn empty_and_corrupt_collections_read_as_empty_list() -> anyhow::Result<()> {
    let t = build_app();
    let (status, body) = call(&t.app, "GET", "/api/collections/planning", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    t.backend.set_item("equipe", "not json at all")?;
    let (status, body) = call(&t.app, "GET", "/api/collections/team-members", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn invalid_collection_requests_rejected() -> anyhow::Result<()> {
    let t = build_app();
    let (status, _) = call(&t.app, "GET", "/api/collections/campers", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let not_a_list = json!({"label": "not a list"});
    let (status, _) = call(&t.app, "PUT", "/api/collections/checklist", Some(not_a_list)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let blank = json!([{"id": uuid::Uuid::new_v4(), "label": "  "}]);
    let (status, body) = call(&t.app, "PUT", "/api/collections/checklist", Some(blank)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("item 0"));
    Ok(())
}

#[tokio::test]
async fn delete_collection_and_clear_store() -> anyhow::Result<()> {
    let t = build_app();
    let item = json!([{"id": uuid::Uuid::new_v4(), "label": "Réserver le car", "done": false}]);
    call(&t.app, "PUT", "/api/collections/checklist", Some(item.clone())).await?;
    call(&t.app, "PUT", "/api/notify/config", Some(delivery_config())).await?;

    let (status, _) = call(&t.app, "DELETE", "/api/collections/checklist", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = call(&t.app, "GET", "/api/collections/checklist", None).await?;
    assert_eq!(body, json!([]));

    let (_, body) = call(&t.app, "GET", "/api/notify/status", None).await?;
    assert_eq!(body["configured"], true);

    let (status, _) = call(&t.app, "DELETE", "/api/store", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = call(&t.app, "GET", "/api/notify/status", None).await?;
    assert_eq!(body["configured"], false);
    let (_, body) = call(&t.app, "GET", "/api/notify/config", None).await?;
    assert_eq!(body, Value::Null);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_collection_writes_all_land() -> anyhow::Result<()> {
    let t = build_app();
    let writes = ["roster", "team-members", "checklist", "planning", "medical-files"].map(|name| {
        let app = t.app.clone();
        tokio::spawn(async move {
            let (status, _) = call(&app, "PUT", &format!("/api/collections/{name}"), Some(json!([]))).await?;
            anyhow::Ok(status)
        })
    });
    for write in writes {
        assert_eq!(write.await??, StatusCode::NO_CONTENT);
    }

    let mut keys = t.backend.keys()?;
    keys.sort();
    assert_eq!(keys, vec!["adminChecklist", "equipe", "fichesSanitaires", "jeunes", "planningData"]);
    Ok(())
}

#[tokio::test]
async fn send_without_config_is_precondition_failed() -> anyhow::Result<()> {
    let t = build_app();
    let (status, body) = call(&t.app, "POST", "/api/notify/send", Some(send_request("a@b.com"))).await?;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["code"], 2001);
    assert!(t.client.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn send_with_config_calls_client_once() -> anyhow::Result<()> {
    let t = build_app();
    let (status, _) = call(&t.app, "PUT", "/api/notify/config", Some(delivery_config())).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, cfg) = call(&t.app, "GET", "/api/notify/config", None).await?;
    assert_eq!(cfg["serviceId"], "s1");

    let (status, body) = call(&t.app, "POST", "/api/notify/send", Some(send_request("a@b.com"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let calls = t.client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].params.subject, "Main courante - Événement du 2024-06-01 à 10:00");
    assert_eq!(calls[0].params.persons_involved, "• Alice (équipe)\n• Bob (jeune)\n• Chloé (jeune)");
    Ok(())
}

#[tokio::test]
async fn send_rejects_bad_recipient_before_delivery() -> anyhow::Result<()> {
    let t = build_app();
    call(&t.app, "PUT", "/api/notify/config", Some(delivery_config())).await?;
    let (status, _) = call(&t.app, "POST", "/api/notify/send", Some(send_request("nobody"))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(t.client.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn delivery_failure_is_bad_gateway() -> anyhow::Result<()> {
    let t = build_app_with(RecordingClient::failing(DeliveryError::Transport("connection refused".into())));
    call(&t.app, "PUT", "/api/notify/config", Some(delivery_config())).await?;
    let (status, body) = call(&t.app, "POST", "/api/notify/send", Some(send_request("a@b.com"))).await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap_or_default().contains("connection refused"));
    Ok(())
}

#[tokio::test]
async fn metrics_exposed() -> anyhow::Result<()> {
    let t = build_app();
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = t.app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
