//! Reimbursement API endpoints

use api_types::reimbursement::{RecordCreated, RecordView, ReimbursementNew, ReviewRequest};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;

use engine::SubmitReimbursementCmd;

use crate::{
    ServerError,
    convert::{map_review_action, review_status_view},
    server::ServerState,
    user,
};

pub async fn submit(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ReimbursementNew>,
) -> Result<Json<RecordCreated>, ServerError> {
    let mut cmd = SubmitReimbursementCmd::new(
        payload.fund_id,
        user.username,
        payload.amount_minor,
        payload.description,
        payload.expense_date,
        Utc::now(),
    );
    if let Some(recipient) = payload.recipient_user_id {
        cmd = cmd.recipient(recipient);
    }
    if let Some(receipt_url) = payload.receipt_url {
        cmd = cmd.receipt_url(receipt_url);
    }
    if let Some(notes) = payload.notes {
        cmd = cmd.notes(notes);
    }

    let id = state.engine.submit_reimbursement(cmd).await?;
    Ok(Json(RecordCreated { id }))
}

pub async fn review(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<RecordView>, ServerError> {
    let reviewed = state
        .engine
        .review_reimbursement(
            id,
            &user.username,
            map_review_action(payload.action),
            payload.notes.as_deref(),
            Utc::now(),
        )
        .await?;
    Ok(Json(RecordView {
        id: reviewed.id,
        fund_id: reviewed.fund_id,
        user_id: reviewed.user_id,
        recipient_user_id: reviewed.recipient_user_id,
        amount_minor: reviewed.amount_minor,
        description: reviewed.description,
        expense_date: reviewed.expense_date,
        status: review_status_view(reviewed.status),
        reviewer_id: reviewed.reviewer_id,
        notes: reviewed.notes,
    }))
}
