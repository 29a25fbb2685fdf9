//! Budgets API endpoints
//!
//! Every read and write goes through the engine's reconciliation, so
//! the `spent_minor` a client sees is always freshly recomputed.

use api_types::{
    Message,
    budget::{BudgetNew, BudgetView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Month;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn draft_from(payload: BudgetNew) -> engine::BudgetDraft {
    engine::BudgetDraft {
        category: payload.category,
        amount_minor: payload.amount_minor,
        month: payload.month,
    }
}

fn view(budget: engine::Budget) -> BudgetView {
    let percentage_used = if budget.amount_minor > 0 {
        budget.spent_minor as f64 / budget.amount_minor as f64 * 100.0
    } else {
        0.0
    };
    BudgetView {
        id: budget.id,
        category: budget.category.as_str().to_string(),
        amount_minor: budget.amount_minor,
        month: budget.month.to_string(),
        spent_minor: budget.spent_minor,
        percentage_used,
        over_budget: budget.over_budget(),
        created_at: budget.created_at,
        updated_at: budget.updated_at,
    }
}

/// Lists the budgets of the current month.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let budgets = state
        .engine
        .list_budgets_for_month(Month::current())
        .await?;
    Ok(Json(budgets.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state.engine.create_budget(draft_from(payload)).await?;
    Ok((StatusCode::CREATED, Json(view(budget))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetNew>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state.engine.update_budget(id, draft_from(payload)).await?;
    Ok(Json(view(budget)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_budget(id).await?;
    Ok(Json(Message {
        message: "Budget deleted successfully".to_string(),
    }))
}
