use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scope of a budget: the whole circle or one group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    Circle,
    Group,
}

/// Review lifecycle of reimbursements and charges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Paid,
}

/// Reviewer verdict on a submitted record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    StartReview,
    Approve,
    Reject,
}

/// Lifecycle of a planned expense line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedStatus {
    Planned,
    Committed,
    Cancelled,
}

/// Cadence of a recurring transfer template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
}

/// State of a recurring transfer template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringStatus {
    Active,
    Paused,
}

/// State of a payment transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Executed,
}

/// Scope selector carried by scope-bound requests.
///
/// `group_id` is required when `budget_type` is `group` and must be absent
/// for `circle`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Scope {
    pub budget_type: BudgetType,
    pub group_id: Option<Uuid>,
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub name: String,
        pub budget_type: BudgetType,
        pub group_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FundNew {
        pub budget_id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FundCreated {
        pub id: Uuid,
    }
}

pub mod reimbursement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReimbursementNew {
        pub fund_id: Uuid,
        /// Payee; defaults to the authenticated submitter.
        pub recipient_user_id: Option<String>,
        pub amount_minor: i64,
        pub description: String,
        pub expense_date: NaiveDate,
        pub receipt_url: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReviewRequest {
        pub action: ReviewAction,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordView {
        pub id: Uuid,
        pub fund_id: Uuid,
        pub user_id: String,
        pub recipient_user_id: String,
        pub amount_minor: i64,
        pub description: String,
        pub expense_date: NaiveDate,
        pub status: ReviewStatus,
        pub reviewer_id: Option<String>,
        pub notes: Option<String>,
    }
}

pub mod charge {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChargeNew {
        pub fund_id: Uuid,
        /// Debtor; defaults to the authenticated submitter.
        pub recipient_user_id: Option<String>,
        pub amount_minor: i64,
        pub description: String,
        pub expense_date: NaiveDate,
        pub notes: Option<String>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DirectExpenseNew {
        pub fund_id: Uuid,
        pub amount_minor: i64,
        pub description: String,
        pub expense_date: NaiveDate,
        pub apartment_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PlannedExpenseNew {
        pub fund_id: Uuid,
        pub amount_minor: i64,
        pub description: String,
        pub planned_date: NaiveDate,
    }
}

pub mod recurring {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringTransferNew {
        pub recipient_user_id: String,
        pub fund_id: Uuid,
        pub amount_minor: i64,
        pub description: String,
        pub frequency: Frequency,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringStatusUpdate {
        pub status: RecurringStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GenerateRecurringResponse {
        /// Newly created records; 0 means everything was already generated.
        pub count: u64,
    }
}

pub mod payment_transfer {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferView {
        pub id: Uuid,
        pub recipient_user_id: String,
        pub budget_type: BudgetType,
        pub group_id: Option<Uuid>,
        /// Signed: positive means the circle owes the member.
        pub total_amount_minor: i64,
        pub reimbursement_count: i64,
        pub status: TransferStatus,
        /// RFC3339 timestamp, including timezone offset.
        pub created_at: DateTime<FixedOffset>,
        pub executed_at: Option<DateTime<FixedOffset>>,
        pub executed_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferDetailResponse {
        pub transfer: TransferView,
        /// Ids of the reimbursements backing the transfer.
        pub reimbursement_ids: Vec<Uuid>,
        /// Ids of the charges backing the transfer.
        pub charge_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferListQuery {
        pub budget_type: BudgetType,
        pub group_id: Option<Uuid>,
        pub status: Option<TransferStatus>,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        ///
        /// Newest → older pagination.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferListResponse {
        pub transfers: Vec<TransferView>,
        /// Opaque cursor for fetching the next page (older items).
        pub next_cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExecuteResponse {
        /// Present when money actually moved.
        pub transfer: Option<TransferView>,
        /// Present when the balance was negative: the debt deferred to the
        /// next netting cycle.
        pub carry_forward_debt_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferStatsView {
        pub pending_count: i64,
        pub pending_total_minor: i64,
        pub executed_count: i64,
        pub executed_total_minor: i64,
    }
}

pub mod fund {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MoveItemsRequest {
        pub budget_type: BudgetType,
        pub group_id: Option<Uuid>,
        pub source_fund_id: Uuid,
        pub target_fund_id: Uuid,
        pub move_reimbursements: bool,
        pub move_planned_expenses: bool,
        pub move_direct_expenses: bool,
        pub from_date: NaiveDate,
        /// Empty or absent means "all statuses".
        pub reimbursement_statuses: Option<Vec<ReviewStatus>>,
        pub planned_statuses: Option<Vec<PlannedStatus>>,
        pub dry_run: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovedCounts {
        pub reimbursements: u64,
        pub planned_expenses: u64,
        pub direct_expenses: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MoveItemsResponse {
        pub dry_run: bool,
        pub source_fund: String,
        pub target_fund: String,
        pub moved: MovedCounts,
    }
}
