//! Payment transfer API endpoints

use api_types::Scope;
use api_types::payment_transfer::{
    ExecuteResponse, TransferDetailResponse, TransferListQuery, TransferListResponse,
    TransferStatsView, TransferView,
};
use api_types::recurring::GenerateRecurringResponse;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use uuid::Uuid;

use engine::{ItemKind, TransferExecution, TransferListFilter};

use crate::{
    ServerError,
    convert::{map_scope, map_transfer_status_filter, transfer_view},
    server::ServerState,
    user,
};

/// Recompute the pending transfers of a scope.
pub async fn refresh(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<Scope>,
) -> Result<Json<Vec<TransferView>>, ServerError> {
    let scope = map_scope(payload.budget_type, payload.group_id)?;
    let transfers = state.engine.refresh_transfers(scope, Utc::now()).await?;

    let mut views = Vec::with_capacity(transfers.len());
    for transfer in transfers {
        views.push(transfer_view(transfer)?);
    }
    Ok(Json(views))
}

/// Generate the current period's records from the recurring templates.
pub async fn generate_recurring(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<GenerateRecurringResponse>, ServerError> {
    let now = Utc::now();
    let count = state
        .engine
        .generate_recurring(now.date_naive(), now)
        .await?;
    Ok(Json(GenerateRecurringResponse { count }))
}

/// Execute one pending transfer.
pub async fn execute(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Scope>,
) -> Result<Json<ExecuteResponse>, ServerError> {
    let scope = map_scope(payload.budget_type, payload.group_id)?;
    let outcome = state
        .engine
        .execute_transfer(scope, id, &user.username, Utc::now())
        .await?;

    let response = match outcome {
        TransferExecution::Executed(transfer) => ExecuteResponse {
            transfer: Some(transfer_view(transfer)?),
            carry_forward_debt_minor: None,
        },
        TransferExecution::CarriedForward { debt_minor } => ExecuteResponse {
            transfer: None,
            carry_forward_debt_minor: Some(debt_minor),
        },
    };
    Ok(Json(response))
}

pub async fn list(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransferListQuery>,
) -> Result<Json<TransferListResponse>, ServerError> {
    let scope = map_scope(query.budget_type, query.group_id)?;
    let filter = TransferListFilter {
        status: query.status.map(map_transfer_status_filter),
    };
    let limit = query.limit.unwrap_or(50);

    let (transfers, next_cursor) = state
        .engine
        .list_payment_transfers(scope, limit, query.cursor.as_deref(), &filter)
        .await?;

    let mut views = Vec::with_capacity(transfers.len());
    for transfer in transfers {
        views.push(transfer_view(transfer)?);
    }
    Ok(Json(TransferListResponse {
        transfers: views,
        next_cursor,
    }))
}

pub async fn get_detail(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<Scope>,
) -> Result<Json<TransferDetailResponse>, ServerError> {
    let scope = map_scope(query.budget_type, query.group_id)?;
    let (transfer, items) = state.engine.payment_transfer(scope, id).await?;

    let mut reimbursement_ids = Vec::new();
    let mut charge_ids = Vec::new();
    for item in items {
        match item.kind {
            ItemKind::Reimbursement => reimbursement_ids.push(item.item_id),
            ItemKind::Charge => charge_ids.push(item.item_id),
        }
    }

    Ok(Json(TransferDetailResponse {
        transfer: transfer_view(transfer)?,
        reimbursement_ids,
        charge_ids,
    }))
}

pub async fn stats(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<Scope>,
) -> Result<Json<TransferStatsView>, ServerError> {
    let scope = map_scope(query.budget_type, query.group_id)?;
    let stats = state.engine.transfer_stats(scope).await?;

    Ok(Json(TransferStatsView {
        pending_count: stats.pending_count,
        pending_total_minor: stats.pending_total_minor,
        executed_count: stats.executed_count,
        executed_total_minor: stats.executed_total_minor,
    }))
}
