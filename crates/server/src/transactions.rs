//! Transactions API endpoints

use api_types::{
    Message,
    transaction::{TransactionKind as ApiKind, TransactionNew, TransactionView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn draft_from(payload: TransactionNew) -> engine::TransactionDraft {
    engine::TransactionDraft {
        amount_minor: payload.amount_minor,
        description: payload.description,
        date: payload.date,
        kind: match payload.kind {
            ApiKind::Income => engine::TransactionKind::Income,
            ApiKind::Expense => engine::TransactionKind::Expense,
        },
        category: payload.category,
    }
}

fn view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        amount_minor: tx.amount_minor,
        description: tx.description,
        date: tx.date,
        kind: map_kind(tx.kind),
        category: tx.category.as_str().to_string(),
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.list_transactions().await?;
    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state.engine.create_transaction(draft_from(payload)).await?;
    Ok((StatusCode::CREATED, Json(view(tx))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .engine
        .update_transaction(id, draft_from(payload))
        .await?;
    Ok(Json(view(tx)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_transaction(id).await?;
    Ok(Json(Message {
        message: "Transaction deleted successfully".to_string(),
    }))
}
