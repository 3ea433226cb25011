//! Recurring transfer template API endpoints

use api_types::recurring::{RecurringCreated, RecurringStatusUpdate, RecurringTransferNew};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use engine::RecurringTransferCmd;

use crate::{
    ServerError,
    convert::{map_frequency, map_recurring_status},
    server::ServerState,
    user,
};

pub async fn create(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<RecurringTransferNew>,
) -> Result<Json<RecurringCreated>, ServerError> {
    let mut cmd = RecurringTransferCmd::new(
        payload.recipient_user_id,
        payload.fund_id,
        payload.amount_minor,
        payload.description,
        map_frequency(payload.frequency),
        payload.start_date,
        Utc::now(),
    );
    if let Some(end_date) = payload.end_date {
        cmd = cmd.end_date(end_date);
    }

    let id = state.engine.new_recurring_transfer(cmd).await?;
    Ok(Json(RecurringCreated { id }))
}

pub async fn set_status(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecurringStatusUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .set_recurring_status(id, map_recurring_status(payload.status))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
