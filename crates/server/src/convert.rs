//! Mappings between API DTO enums and engine types.

use chrono::FixedOffset;
use uuid::Uuid;

use api_types::payment_transfer::TransferView;

use crate::ServerError;

pub(crate) fn map_scope(
    budget_type: api_types::BudgetType,
    group_id: Option<Uuid>,
) -> Result<engine::BudgetScope, ServerError> {
    match (budget_type, group_id) {
        (api_types::BudgetType::Circle, None) => Ok(engine::BudgetScope::Circle),
        (api_types::BudgetType::Circle, Some(_)) => Err(ServerError::Generic(
            "group_id is not allowed for circle scope".to_string(),
        )),
        (api_types::BudgetType::Group, Some(group_id)) => {
            Ok(engine::BudgetScope::Group(group_id))
        }
        (api_types::BudgetType::Group, None) => Err(ServerError::Generic(
            "group_id is required for group scope".to_string(),
        )),
    }
}

pub(crate) fn map_budget_type(budget_type: engine::BudgetType) -> api_types::BudgetType {
    match budget_type {
        engine::BudgetType::Circle => api_types::BudgetType::Circle,
        engine::BudgetType::Group => api_types::BudgetType::Group,
    }
}

pub(crate) fn map_transfer_status(status: engine::TransferStatus) -> api_types::TransferStatus {
    match status {
        engine::TransferStatus::Pending => api_types::TransferStatus::Pending,
        engine::TransferStatus::Executed => api_types::TransferStatus::Executed,
    }
}

pub(crate) fn map_transfer_status_filter(
    status: api_types::TransferStatus,
) -> engine::TransferStatus {
    match status {
        api_types::TransferStatus::Pending => engine::TransferStatus::Pending,
        api_types::TransferStatus::Executed => engine::TransferStatus::Executed,
    }
}

pub(crate) fn map_review_action(action: api_types::ReviewAction) -> engine::ReviewAction {
    match action {
        api_types::ReviewAction::StartReview => engine::ReviewAction::StartReview,
        api_types::ReviewAction::Approve => engine::ReviewAction::Approve,
        api_types::ReviewAction::Reject => engine::ReviewAction::Reject,
    }
}

pub(crate) fn review_status_view(status: engine::ReviewStatus) -> api_types::ReviewStatus {
    match status {
        engine::ReviewStatus::Pending => api_types::ReviewStatus::Pending,
        engine::ReviewStatus::UnderReview => api_types::ReviewStatus::UnderReview,
        engine::ReviewStatus::Approved => api_types::ReviewStatus::Approved,
        engine::ReviewStatus::Rejected => api_types::ReviewStatus::Rejected,
        engine::ReviewStatus::Paid => api_types::ReviewStatus::Paid,
    }
}

pub(crate) fn map_review_status(status: api_types::ReviewStatus) -> engine::ReviewStatus {
    match status {
        api_types::ReviewStatus::Pending => engine::ReviewStatus::Pending,
        api_types::ReviewStatus::UnderReview => engine::ReviewStatus::UnderReview,
        api_types::ReviewStatus::Approved => engine::ReviewStatus::Approved,
        api_types::ReviewStatus::Rejected => engine::ReviewStatus::Rejected,
        api_types::ReviewStatus::Paid => engine::ReviewStatus::Paid,
    }
}

pub(crate) fn map_planned_status(status: api_types::PlannedStatus) -> engine::PlannedStatus {
    match status {
        api_types::PlannedStatus::Planned => engine::PlannedStatus::Planned,
        api_types::PlannedStatus::Committed => engine::PlannedStatus::Committed,
        api_types::PlannedStatus::Cancelled => engine::PlannedStatus::Cancelled,
    }
}

pub(crate) fn map_frequency(frequency: api_types::Frequency) -> engine::Frequency {
    match frequency {
        api_types::Frequency::Monthly => engine::Frequency::Monthly,
        api_types::Frequency::Quarterly => engine::Frequency::Quarterly,
        api_types::Frequency::Annual => engine::Frequency::Annual,
    }
}

pub(crate) fn map_recurring_status(status: api_types::RecurringStatus) -> engine::RecurringStatus {
    match status {
        api_types::RecurringStatus::Active => engine::RecurringStatus::Active,
        api_types::RecurringStatus::Paused => engine::RecurringStatus::Paused,
    }
}

pub(crate) fn transfer_view(transfer: engine::PaymentTransfer) -> Result<TransferView, ServerError> {
    let utc = FixedOffset::east_opt(0)
        .ok_or_else(|| ServerError::Generic("invalid UTC offset".to_string()))?;
    Ok(TransferView {
        id: transfer.id,
        recipient_user_id: transfer.recipient_user_id,
        budget_type: map_budget_type(transfer.budget_type),
        group_id: transfer.group_id,
        total_amount_minor: transfer.total_amount_minor,
        reimbursement_count: transfer.reimbursement_count,
        status: map_transfer_status(transfer.status),
        created_at: transfer.created_at.with_timezone(&utc),
        executed_at: transfer.executed_at.map(|at| at.with_timezone(&utc)),
        executed_by: transfer.executed_by,
    })
}
