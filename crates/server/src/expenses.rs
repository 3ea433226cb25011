//! Direct and planned expense API endpoints

use api_types::expense::{DirectExpenseNew, PlannedExpenseNew};
use api_types::reimbursement::RecordCreated;
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use engine::{DirectExpenseCmd, PlannedExpenseCmd};

use crate::{ServerError, server::ServerState, user};

pub async fn direct_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<DirectExpenseNew>,
) -> Result<Json<RecordCreated>, ServerError> {
    let mut cmd = DirectExpenseCmd::new(
        payload.fund_id,
        user.username,
        payload.amount_minor,
        payload.description,
        payload.expense_date,
        Utc::now(),
    );
    if let Some(apartment_id) = payload.apartment_id {
        cmd = cmd.apartment_id(apartment_id);
    }

    let id = state.engine.new_direct_expense(cmd).await?;
    Ok(Json(RecordCreated { id }))
}

pub async fn planned_new(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PlannedExpenseNew>,
) -> Result<Json<RecordCreated>, ServerError> {
    let cmd = PlannedExpenseCmd::new(
        payload.fund_id,
        payload.amount_minor,
        payload.description,
        payload.planned_date,
        Utc::now(),
    );

    let id = state.engine.new_planned_expense(cmd).await?;
    Ok(Json(RecordCreated { id }))
}
