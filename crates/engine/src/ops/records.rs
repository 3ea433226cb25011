//! Record lifecycle operations: submit and review reimbursements and
//! charges, enter direct and planned expenses, manage recurring templates.
//!
//! Review transitions: `start_review` only from `pending`; `approve` and
//! `reject` from `pending` or `under_review`. `paid` is never set here.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Charge, DirectExpense, DirectExpenseCmd, EngineError, PlannedExpense, PlannedExpenseCmd,
    RecurringStatus, RecurringTransfer, RecurringTransferCmd, Reimbursement, ResultEngine,
    ReviewAction, ReviewStatus, SubmitChargeCmd, SubmitReimbursementCmd, charges, direct_expenses,
    planned_expenses, recurring_transfers, reimbursements,
    util::normalize_optional_text,
};

use super::{Engine, with_tx};

fn next_review_status(current: ReviewStatus, action: ReviewAction) -> ResultEngine<ReviewStatus> {
    match (current, action) {
        (ReviewStatus::Pending, ReviewAction::StartReview) => Ok(ReviewStatus::UnderReview),
        (ReviewStatus::Pending | ReviewStatus::UnderReview, ReviewAction::Approve) => {
            Ok(ReviewStatus::Approved)
        }
        (ReviewStatus::Pending | ReviewStatus::UnderReview, ReviewAction::Reject) => {
            Ok(ReviewStatus::Rejected)
        }
        (current, action) => Err(EngineError::InvalidState(format!(
            "cannot {} a {} record",
            action.as_str(),
            current.as_str()
        ))),
    }
}

impl Engine {
    /// Submit a reimbursement. The recipient defaults to the submitter.
    pub async fn submit_reimbursement(&self, cmd: SubmitReimbursementCmd) -> ResultEngine<Uuid> {
        let SubmitReimbursementCmd {
            fund_id,
            user_id,
            recipient_user_id,
            amount_minor,
            description,
            expense_date,
            receipt_url,
            notes,
            created_at,
        } = cmd;
        let recipient = recipient_user_id.unwrap_or_else(|| user_id.clone());

        with_tx!(self, |db_tx| {
            self.require_fund(&db_tx, fund_id).await?;
            self.require_user_exists(&db_tx, &user_id).await?;
            self.require_user_exists(&db_tx, &recipient).await?;

            let mut reimbursement = Reimbursement::new(
                fund_id,
                user_id,
                recipient,
                amount_minor,
                description,
                expense_date,
                created_at,
            )?;
            reimbursement.receipt_url = normalize_optional_text(receipt_url.as_deref());
            reimbursement.notes = normalize_optional_text(notes.as_deref());

            reimbursements::ActiveModel::from(&reimbursement)
                .insert(&db_tx)
                .await?;
            Ok(reimbursement.id)
        })
    }

    /// Apply a reviewer verdict to a reimbursement.
    pub async fn review_reimbursement(
        &self,
        reimbursement_id: Uuid,
        reviewer_id: &str,
        action: ReviewAction,
        notes: Option<&str>,
        reviewed_at: DateTime<Utc>,
    ) -> ResultEngine<Reimbursement> {
        with_tx!(self, |db_tx| {
            let model = reimbursements::Entity::find_by_id(reimbursement_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("reimbursement".to_string()))?;
            self.require_user_exists(&db_tx, reviewer_id).await?;

            let current = ReviewStatus::try_from(model.status.as_str())?;
            let next = next_review_status(current, action)?;

            let mut active = reimbursements::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                status: ActiveValue::Set(next.as_str().to_string()),
                reviewer_id: ActiveValue::Set(Some(reviewer_id.to_string())),
                reviewed_at: ActiveValue::Set(Some(reviewed_at)),
                ..Default::default()
            };
            if let Some(notes) = normalize_optional_text(notes) {
                active.notes = ActiveValue::Set(Some(notes));
            }
            let updated = active.update(&db_tx).await?;
            Reimbursement::try_from(updated)
        })
    }

    /// Submit a charge. The debtor defaults to the submitter.
    pub async fn submit_charge(&self, cmd: SubmitChargeCmd) -> ResultEngine<Uuid> {
        let SubmitChargeCmd {
            fund_id,
            user_id,
            recipient_user_id,
            amount_minor,
            description,
            expense_date,
            notes,
            created_at,
        } = cmd;
        let recipient = recipient_user_id.unwrap_or_else(|| user_id.clone());

        with_tx!(self, |db_tx| {
            self.require_fund(&db_tx, fund_id).await?;
            self.require_user_exists(&db_tx, &user_id).await?;
            self.require_user_exists(&db_tx, &recipient).await?;

            let mut charge = Charge::new(
                fund_id,
                user_id,
                recipient,
                amount_minor,
                description,
                expense_date,
                created_at,
            )?;
            charge.notes = normalize_optional_text(notes.as_deref());

            charges::ActiveModel::from(&charge).insert(&db_tx).await?;
            Ok(charge.id)
        })
    }

    /// Apply a reviewer verdict to a charge.
    pub async fn review_charge(
        &self,
        charge_id: Uuid,
        reviewer_id: &str,
        action: ReviewAction,
        notes: Option<&str>,
        reviewed_at: DateTime<Utc>,
    ) -> ResultEngine<Charge> {
        with_tx!(self, |db_tx| {
            let model = charges::Entity::find_by_id(charge_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("charge".to_string()))?;
            self.require_user_exists(&db_tx, reviewer_id).await?;

            let current = ReviewStatus::try_from(model.status.as_str())?;
            let next = next_review_status(current, action)?;

            let mut active = charges::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                status: ActiveValue::Set(next.as_str().to_string()),
                reviewer_id: ActiveValue::Set(Some(reviewer_id.to_string())),
                reviewed_at: ActiveValue::Set(Some(reviewed_at)),
                ..Default::default()
            };
            if let Some(notes) = normalize_optional_text(notes) {
                active.notes = ActiveValue::Set(Some(notes));
            }
            let updated = active.update(&db_tx).await?;
            Charge::try_from(updated)
        })
    }

    /// Enter a direct expense (no review flow).
    pub async fn new_direct_expense(&self, cmd: DirectExpenseCmd) -> ResultEngine<Uuid> {
        let DirectExpenseCmd {
            fund_id,
            user_id,
            amount_minor,
            description,
            expense_date,
            apartment_id,
            created_at,
        } = cmd;

        with_tx!(self, |db_tx| {
            self.require_fund(&db_tx, fund_id).await?;
            self.require_user_exists(&db_tx, &user_id).await?;

            let mut expense = DirectExpense::new(
                fund_id,
                user_id,
                amount_minor,
                description,
                expense_date,
                created_at,
            )?;
            expense.apartment_id = apartment_id;

            direct_expenses::ActiveModel::from(&expense)
                .insert(&db_tx)
                .await?;
            Ok(expense.id)
        })
    }

    /// Enter a planned expense line.
    pub async fn new_planned_expense(&self, cmd: PlannedExpenseCmd) -> ResultEngine<Uuid> {
        let PlannedExpenseCmd {
            fund_id,
            amount_minor,
            description,
            planned_date,
            created_at,
        } = cmd;

        with_tx!(self, |db_tx| {
            self.require_fund(&db_tx, fund_id).await?;

            let expense = PlannedExpense::new(
                fund_id,
                amount_minor,
                description,
                planned_date,
                created_at,
            )?;
            planned_expenses::ActiveModel::from(&expense)
                .insert(&db_tx)
                .await?;
            Ok(expense.id)
        })
    }

    /// Create a recurring transfer template.
    pub async fn new_recurring_transfer(&self, cmd: RecurringTransferCmd) -> ResultEngine<Uuid> {
        let RecurringTransferCmd {
            recipient_user_id,
            fund_id,
            amount_minor,
            description,
            frequency,
            start_date,
            end_date,
            created_at,
        } = cmd;

        with_tx!(self, |db_tx| {
            self.require_fund(&db_tx, fund_id).await?;
            self.require_user_exists(&db_tx, &recipient_user_id).await?;

            let template = RecurringTransfer::new(
                recipient_user_id,
                fund_id,
                amount_minor,
                description,
                frequency,
                start_date,
                end_date,
                created_at,
            )?;
            recurring_transfers::ActiveModel::from(&template)
                .insert(&db_tx)
                .await?;
            Ok(template.id)
        })
    }

    /// Pause or resume a recurring template.
    pub async fn set_recurring_status(
        &self,
        recurring_transfer_id: Uuid,
        status: RecurringStatus,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = recurring_transfers::Entity::find_by_id(recurring_transfer_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("recurring transfer".to_string()))?;

            let active = recurring_transfers::ActiveModel {
                id: ActiveValue::Set(model.id),
                status: ActiveValue::Set(status.as_str().to_string()),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }
}
