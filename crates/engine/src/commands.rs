//! Command structs for engine operations.
//!
//! These types group parameters for write operations (submit/review records,
//! recurring templates, fund movement), keeping call sites readable and
//! avoiding long argument lists.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{Frequency, PlannedStatus, ReviewStatus};

/// Submit a reimbursement (credit owed to a member).
#[derive(Clone, Debug)]
pub struct SubmitReimbursementCmd {
    pub fund_id: Uuid,
    pub user_id: String,
    /// Payee; defaults to the submitter when absent.
    pub recipient_user_id: Option<String>,
    pub amount_minor: i64,
    pub description: String,
    pub expense_date: NaiveDate,
    pub receipt_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SubmitReimbursementCmd {
    #[must_use]
    pub fn new(
        fund_id: Uuid,
        user_id: impl Into<String>,
        amount_minor: i64,
        description: impl Into<String>,
        expense_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fund_id,
            user_id: user_id.into(),
            recipient_user_id: None,
            amount_minor,
            description: description.into(),
            expense_date,
            receipt_url: None,
            notes: None,
            created_at,
        }
    }

    #[must_use]
    pub fn recipient(mut self, recipient_user_id: impl Into<String>) -> Self {
        self.recipient_user_id = Some(recipient_user_id.into());
        self
    }

    #[must_use]
    pub fn receipt_url(mut self, receipt_url: impl Into<String>) -> Self {
        self.receipt_url = Some(receipt_url.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Submit a charge (debit owed by a member to the circle).
#[derive(Clone, Debug)]
pub struct SubmitChargeCmd {
    pub fund_id: Uuid,
    pub user_id: String,
    /// Debtor; defaults to the submitter when absent.
    pub recipient_user_id: Option<String>,
    pub amount_minor: i64,
    pub description: String,
    pub expense_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SubmitChargeCmd {
    #[must_use]
    pub fn new(
        fund_id: Uuid,
        user_id: impl Into<String>,
        amount_minor: i64,
        description: impl Into<String>,
        expense_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fund_id,
            user_id: user_id.into(),
            recipient_user_id: None,
            amount_minor,
            description: description.into(),
            expense_date,
            notes: None,
            created_at,
        }
    }

    #[must_use]
    pub fn recipient(mut self, recipient_user_id: impl Into<String>) -> Self {
        self.recipient_user_id = Some(recipient_user_id.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Record a treasurer-entered direct expense.
#[derive(Clone, Debug)]
pub struct DirectExpenseCmd {
    pub fund_id: Uuid,
    pub user_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub expense_date: NaiveDate,
    pub apartment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl DirectExpenseCmd {
    #[must_use]
    pub fn new(
        fund_id: Uuid,
        user_id: impl Into<String>,
        amount_minor: i64,
        description: impl Into<String>,
        expense_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fund_id,
            user_id: user_id.into(),
            amount_minor,
            description: description.into(),
            expense_date,
            apartment_id: None,
            created_at,
        }
    }

    #[must_use]
    pub fn apartment_id(mut self, apartment_id: Uuid) -> Self {
        self.apartment_id = Some(apartment_id);
        self
    }
}

/// Record a planned (forecast) expense line.
#[derive(Clone, Debug)]
pub struct PlannedExpenseCmd {
    pub fund_id: Uuid,
    pub amount_minor: i64,
    pub description: String,
    pub planned_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl PlannedExpenseCmd {
    #[must_use]
    pub fn new(
        fund_id: Uuid,
        amount_minor: i64,
        description: impl Into<String>,
        planned_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fund_id,
            amount_minor,
            description: description.into(),
            planned_date,
            created_at,
        }
    }
}

/// Create a recurring transfer template.
#[derive(Clone, Debug)]
pub struct RecurringTransferCmd {
    pub recipient_user_id: String,
    pub fund_id: Uuid,
    pub amount_minor: i64,
    pub description: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl RecurringTransferCmd {
    #[must_use]
    pub fn new(
        recipient_user_id: impl Into<String>,
        fund_id: Uuid,
        amount_minor: i64,
        description: impl Into<String>,
        frequency: Frequency,
        start_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            recipient_user_id: recipient_user_id.into(),
            fund_id,
            amount_minor,
            description: description.into(),
            frequency,
            start_date,
            end_date: None,
            created_at,
        }
    }

    #[must_use]
    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Move matching records from one fund to another.
///
/// A `dry_run` reports the exact counts a commit with the same arguments
/// would move, without mutating anything. An empty status subset means "all
/// statuses".
#[derive(Clone, Debug)]
pub struct MoveItemsCmd {
    pub source_fund_id: Uuid,
    pub target_fund_id: Uuid,
    pub move_reimbursements: bool,
    pub move_planned_expenses: bool,
    pub move_direct_expenses: bool,
    pub from_date: NaiveDate,
    pub reimbursement_statuses: Option<Vec<ReviewStatus>>,
    pub planned_statuses: Option<Vec<PlannedStatus>>,
    pub dry_run: bool,
}

impl MoveItemsCmd {
    #[must_use]
    pub fn new(source_fund_id: Uuid, target_fund_id: Uuid, from_date: NaiveDate) -> Self {
        Self {
            source_fund_id,
            target_fund_id,
            move_reimbursements: false,
            move_planned_expenses: false,
            move_direct_expenses: false,
            from_date,
            reimbursement_statuses: None,
            planned_statuses: None,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn reimbursements(mut self, statuses: Option<Vec<ReviewStatus>>) -> Self {
        self.move_reimbursements = true;
        self.reimbursement_statuses = statuses;
        self
    }

    #[must_use]
    pub fn planned_expenses(mut self, statuses: Option<Vec<PlannedStatus>>) -> Self {
        self.move_planned_expenses = true;
        self.planned_statuses = statuses;
        self
    }

    #[must_use]
    pub fn direct_expenses(mut self) -> Self {
        self.move_direct_expenses = true;
        self
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
