use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn current_month() -> String {
    chrono::Utc::now().format("%Y-%m").to_string()
}

fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}

#[tokio::test]
async fn transaction_create_then_list_round_trips() {
    let app = app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "amount_minor": 15_000,
            "description": "Groceries",
            "date": "2024-03-05",
            "type": "expense",
            "category": "Food & Dining",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["category"], "Food & Dining");

    let (status, listed) = send(&app, "GET", "/transactions", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["amount_minor"], 15_000);
    assert_eq!(listed[0]["date"], "2024-03-05");
    assert_eq!(listed[0]["type"], "expense");
}

#[tokio::test]
async fn transaction_list_is_newest_first() {
    let app = app().await;

    for date in ["2024-03-05", "2024-03-20", "2024-03-01"] {
        let (status, _) = send(
            &app,
            "POST",
            "/transactions",
            Some(json!({
                "amount_minor": 1_000,
                "description": "entry",
                "date": date,
                "type": "expense",
                "category": "Other",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, listed) = send(&app, "GET", "/transactions", None).await;
    let dates: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|tx| tx["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2024-03-20", "2024-03-05", "2024-03-01"]);
}

#[tokio::test]
async fn invalid_transaction_is_rejected_with_400() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "amount_minor": 0,
            "description": "free lunch",
            "date": "2024-03-05",
            "type": "expense",
            "category": "Food & Dining",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("amount"));

    // Income category on an expense transaction.
    let (status, _) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "amount_minor": 1_000,
            "description": "mismatch",
            "date": "2024-03-05",
            "type": "expense",
            "category": "Salary",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_transaction_maps_to_404() {
    let app = app().await;

    let uri = format!("/transactions/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn budgets_list_reflects_current_month_spending() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/budgets",
        Some(json!({
            "category": "Food & Dining",
            "amount_minor": 50_000,
            "month": current_month(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "amount_minor": 15_000,
            "description": "Groceries",
            "date": today(),
            "type": "expense",
            "category": "Food & Dining",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, budgets) = send(&app, "GET", "/budgets", None).await;
    assert_eq!(status, StatusCode::OK);
    let budgets = budgets.as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["spent_minor"], 15_000);
    assert_eq!(budgets[0]["percentage_used"], 30.0);
    assert_eq!(budgets[0]["over_budget"], false);
}

#[tokio::test]
async fn duplicate_budget_maps_to_400() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/budgets",
        Some(json!({
            "category": "Housing",
            "amount_minor": 100_000,
            "month": "2024-03",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/budgets",
        Some(json!({
            "category": "Housing",
            "amount_minor": 1,
            "month": "2024-03",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Housing"));
}

#[tokio::test]
async fn budget_update_recomputes_spent() {
    let app = app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/budgets",
        Some(json!({
            "category": "Shopping",
            "amount_minor": 20_000,
            "month": "2024-03",
        })),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/transactions",
        Some(json!({
            "amount_minor": 25_000,
            "description": "new couch",
            "date": "2024-03-12",
            "type": "expense",
            "category": "Shopping",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Re-save with its own (category, month): allowed, and spent is fresh.
    let uri = format!("/budgets/{}", created["id"].as_str().unwrap());
    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "category": "Shopping",
            "amount_minor": 20_000,
            "month": "2024-03",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["spent_minor"], 25_000);
    assert_eq!(updated["over_budget"], true);
}

#[tokio::test]
async fn budget_delete_returns_message_and_404_after() {
    let app = app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/budgets",
        Some(json!({
            "category": "Education",
            "amount_minor": 5_000,
            "month": "2024-03",
        })),
    )
    .await;

    let uri = format!("/budgets/{}", created["id"].as_str().unwrap());
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget deleted successfully");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
