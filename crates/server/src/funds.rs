//! Budget, fund and fund-movement API endpoints

use api_types::budget::{BudgetCreated, BudgetNew, FundCreated, FundNew};
use api_types::fund::{MoveItemsRequest, MoveItemsResponse, MovedCounts};
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use engine::MoveItemsCmd;

use crate::{
    ServerError,
    convert::{map_planned_status, map_review_status, map_scope},
    server::ServerState,
    user,
};

pub async fn budget_new(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<Json<BudgetCreated>, ServerError> {
    let scope = map_scope(payload.budget_type, payload.group_id)?;
    let id = state
        .engine
        .new_budget(&payload.name, scope, Utc::now())
        .await?;
    Ok(Json(BudgetCreated { id }))
}

pub async fn fund_new(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<FundNew>,
) -> Result<Json<FundCreated>, ServerError> {
    let id = state
        .engine
        .new_fund(payload.budget_id, &payload.name, Utc::now())
        .await?;
    Ok(Json(FundCreated { id }))
}

/// Move a filtered batch of records between two funds, or preview the counts
/// with `dry_run`.
pub async fn move_items(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<MoveItemsRequest>,
) -> Result<Json<MoveItemsResponse>, ServerError> {
    let scope = map_scope(payload.budget_type, payload.group_id)?;

    let mut cmd = MoveItemsCmd::new(
        payload.source_fund_id,
        payload.target_fund_id,
        payload.from_date,
    )
    .dry_run(payload.dry_run);
    if payload.move_reimbursements {
        let statuses = payload
            .reimbursement_statuses
            .map(|s| s.into_iter().map(map_review_status).collect());
        cmd = cmd.reimbursements(statuses);
    }
    if payload.move_planned_expenses {
        let statuses = payload
            .planned_statuses
            .map(|s| s.into_iter().map(map_planned_status).collect());
        cmd = cmd.planned_expenses(statuses);
    }
    if payload.move_direct_expenses {
        cmd = cmd.direct_expenses();
    }

    let report = state.engine.move_fund_items(scope, cmd).await?;
    Ok(Json(MoveItemsResponse {
        dry_run: report.dry_run,
        source_fund: report.source_fund,
        target_fund: report.target_fund,
        moved: MovedCounts {
            reimbursements: report.moved.reimbursements,
            planned_expenses: report.moved.planned_expenses,
            direct_expenses: report.moved.direct_expenses,
        },
    }))
}
