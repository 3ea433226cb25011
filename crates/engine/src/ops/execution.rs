//! Transfer execution.
//!
//! Executing a pending transfer settles its linked records atomically. A
//! non-negative total pays the recipient: every linked reimbursement and
//! charge becomes `paid` and the transfer becomes `executed`. A negative
//! total means the recipient owes the circle: the linked charges are consumed
//! but the reimbursements stay `approved` so the next refresh nets them
//! against future activity, and the transfer row is deleted because no money
//! moved. The debt is reported to the caller as carry-forward.
//!
//! Every linked record is re-checked inside the transaction; any status that
//! drifted since netting aborts the whole execution with a conflict.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    BudgetScope, EngineError, ItemKind, PaymentTransfer, ResultEngine, ReviewStatus,
    TransferStatus, charges, payment_transfers, reimbursements, transfer_items,
};

use super::{Engine, with_tx};

/// Outcome of executing a pending transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferExecution {
    /// Money moved; the transfer is now `executed`.
    Executed(PaymentTransfer),
    /// The recipient owed more than they were owed; the debt carries forward
    /// to the next netting cycle and the transfer row is gone.
    CarriedForward { debt_minor: i64 },
}

impl Engine {
    /// Execute one pending transfer on behalf of `actor`.
    pub async fn execute_transfer(
        &self,
        scope: BudgetScope,
        transfer_id: Uuid,
        actor: &str,
        executed_at: DateTime<Utc>,
    ) -> ResultEngine<TransferExecution> {
        with_tx!(self, |db_tx| {
            let transfer = self
                .require_transfer_in_scope(&db_tx, transfer_id, &scope)
                .await?;
            if transfer.status != TransferStatus::Pending.as_str() {
                return Err(EngineError::InvalidState(
                    "payment transfer is not pending".to_string(),
                ));
            }

            let (reimbursement_ids, charge_ids) =
                self.linked_item_ids(&db_tx, &transfer.id).await?;
            self.check_links_unchanged(&db_tx, &reimbursement_ids, &charge_ids)
                .await?;

            // Linked charges settle on both paths: paying them out and
            // consuming them against the debt are the same bookkeeping move.
            self.settle_charges(&db_tx, &charge_ids).await?;

            if transfer.total_amount_minor >= 0 {
                self.settle_reimbursements(&db_tx, &reimbursement_ids)
                    .await?;

                let active = payment_transfers::ActiveModel {
                    id: ActiveValue::Set(transfer.id.clone()),
                    status: ActiveValue::Set(TransferStatus::Executed.as_str().to_string()),
                    executed_at: ActiveValue::Set(Some(executed_at)),
                    executed_by: ActiveValue::Set(Some(actor.to_string())),
                    ..Default::default()
                };
                let updated = active.update(&db_tx).await?;
                Ok(TransferExecution::Executed(PaymentTransfer::try_from(
                    updated,
                )?))
            } else {
                let debt_minor = transfer.total_amount_minor.abs();
                transfer_items::Entity::delete_many()
                    .filter(transfer_items::Column::TransferId.eq(transfer.id.clone()))
                    .exec(&db_tx)
                    .await?;
                payment_transfers::Entity::delete_by_id(transfer.id)
                    .exec(&db_tx)
                    .await?;
                Ok(TransferExecution::CarriedForward { debt_minor })
            }
        })
    }

    async fn linked_item_ids(
        &self,
        db_tx: &DatabaseTransaction,
        transfer_id: &str,
    ) -> ResultEngine<(Vec<String>, Vec<String>)> {
        let items = transfer_items::Entity::find()
            .filter(transfer_items::Column::TransferId.eq(transfer_id.to_string()))
            .all(db_tx)
            .await?;

        let mut reimbursement_ids = Vec::new();
        let mut charge_ids = Vec::new();
        for item in items {
            match ItemKind::try_from(item.item_kind.as_str())? {
                ItemKind::Reimbursement => reimbursement_ids.push(item.item_id),
                ItemKind::Charge => charge_ids.push(item.item_id),
            }
        }
        Ok((reimbursement_ids, charge_ids))
    }

    /// Every linked record must still be in the status netting saw, otherwise
    /// the transfer totals no longer describe reality.
    async fn check_links_unchanged(
        &self,
        db_tx: &DatabaseTransaction,
        reimbursement_ids: &[String],
        charge_ids: &[String],
    ) -> ResultEngine<()> {
        if !reimbursement_ids.is_empty() {
            let models = reimbursements::Entity::find()
                .filter(reimbursements::Column::Id.is_in(reimbursement_ids.to_vec()))
                .all(db_tx)
                .await?;
            if models.len() != reimbursement_ids.len() {
                return Err(EngineError::Conflict(
                    "a linked reimbursement no longer exists".to_string(),
                ));
            }
            for model in models {
                let status = ReviewStatus::try_from(model.status.as_str())?;
                if status != ReviewStatus::Approved {
                    return Err(EngineError::Conflict(format!(
                        "reimbursement {} changed status since netting",
                        model.id
                    )));
                }
            }
        }

        if !charge_ids.is_empty() {
            let models = charges::Entity::find()
                .filter(charges::Column::Id.is_in(charge_ids.to_vec()))
                .all(db_tx)
                .await?;
            if models.len() != charge_ids.len() {
                return Err(EngineError::Conflict(
                    "a linked charge no longer exists".to_string(),
                ));
            }
            for model in models {
                let status = ReviewStatus::try_from(model.status.as_str())?;
                if !status.is_open_debt() {
                    return Err(EngineError::Conflict(format!(
                        "charge {} changed status since netting",
                        model.id
                    )));
                }
            }
        }

        Ok(())
    }

    async fn settle_reimbursements(
        &self,
        db_tx: &DatabaseTransaction,
        ids: &[String],
    ) -> ResultEngine<()> {
        for id in ids {
            let active = reimbursements::ActiveModel {
                id: ActiveValue::Set(id.clone()),
                status: ActiveValue::Set(ReviewStatus::Paid.as_str().to_string()),
                ..Default::default()
            };
            active.update(db_tx).await?;
        }
        Ok(())
    }

    async fn settle_charges(&self, db_tx: &DatabaseTransaction, ids: &[String]) -> ResultEngine<()> {
        for id in ids {
            let active = charges::ActiveModel {
                id: ActiveValue::Set(id.clone()),
                status: ActiveValue::Set(ReviewStatus::Paid.as_str().to_string()),
                ..Default::default()
            };
            active.update(db_tx).await?;
        }
        Ok(())
    }
}
