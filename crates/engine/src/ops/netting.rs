//! The netting engine.
//!
//! `refresh_transfers` recomputes the pending payment transfers for one
//! budget scope: it sums each recipient's approved reimbursements minus their
//! open charges, then materializes the result as pending transfer rows,
//! updating existing ones in place so a recipient never holds more than one
//! pending transfer per scope. Refresh never touches the status of the
//! underlying records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    BudgetScope, ItemKind, PaymentTransfer, ResultEngine, ReviewStatus, TransferItem,
    TransferStatus, charges, payment_transfers, reimbursements, transfer_items,
    util::parse_uuid,
};

use super::{Engine, with_tx};

#[derive(Debug, Default)]
struct NetGroup {
    total_minor: i64,
    reimbursement_count: i64,
    items: Vec<(ItemKind, Uuid)>,
}

impl Engine {
    /// Recompute all pending transfers for `scope`.
    ///
    /// Idempotent: a second refresh over unchanged inputs produces the same
    /// transfer rows (same ids, same totals). A recipient whose previously
    /// pending transfer no longer has any contributing records loses the
    /// stale row.
    pub async fn refresh_transfers(
        &self,
        scope: BudgetScope,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<PaymentTransfer>> {
        with_tx!(self, |db_tx| {
            let groups = self.collect_net_groups(&db_tx, &scope).await?;
            let mut pending = self.pending_transfers_by_recipient(&db_tx, &scope).await?;
            let mut out = Vec::with_capacity(groups.len());

            for (recipient, group) in groups {
                let transfer = match pending.remove(&recipient) {
                    Some(existing) => {
                        let active = payment_transfers::ActiveModel {
                            id: ActiveValue::Set(existing.id.clone()),
                            total_amount_minor: ActiveValue::Set(group.total_minor),
                            reimbursement_count: ActiveValue::Set(group.reimbursement_count),
                            ..Default::default()
                        };
                        let updated = active.update(&db_tx).await?;
                        self.replace_items(&db_tx, &updated.id, &group.items).await?;
                        PaymentTransfer::try_from(updated)?
                    }
                    None => {
                        let transfer = PaymentTransfer {
                            id: Uuid::new_v4(),
                            recipient_user_id: recipient,
                            budget_type: scope.budget_type(),
                            group_id: scope.group_id(),
                            total_amount_minor: group.total_minor,
                            reimbursement_count: group.reimbursement_count,
                            status: TransferStatus::Pending,
                            created_at: now,
                            executed_at: None,
                            executed_by: None,
                        };
                        payment_transfers::ActiveModel::from(&transfer)
                            .insert(&db_tx)
                            .await?;
                        self.replace_items(&db_tx, &transfer.id.to_string(), &group.items)
                            .await?;
                        transfer
                    }
                };
                out.push(transfer);
            }

            // Whatever is left had a pending transfer but no contributing
            // records anymore: drop the stale rows.
            for stale in pending.into_values() {
                transfer_items::Entity::delete_many()
                    .filter(transfer_items::Column::TransferId.eq(stale.id.clone()))
                    .exec(&db_tx)
                    .await?;
                payment_transfers::Entity::delete_by_id(stale.id)
                    .exec(&db_tx)
                    .await?;
            }

            Ok(out)
        })
    }

    async fn collect_net_groups(
        &self,
        db_tx: &DatabaseTransaction,
        scope: &BudgetScope,
    ) -> ResultEngine<BTreeMap<String, NetGroup>> {
        let fund_ids = self.scope_fund_ids(db_tx, scope).await?;
        let mut groups: BTreeMap<String, NetGroup> = BTreeMap::new();
        if fund_ids.is_empty() {
            return Ok(groups);
        }

        let credit_models = reimbursements::Entity::find()
            .filter(reimbursements::Column::FundId.is_in(fund_ids.clone()))
            .filter(reimbursements::Column::Status.eq(ReviewStatus::Approved.as_str()))
            .all(db_tx)
            .await?;
        for model in credit_models {
            let entry = groups.entry(model.recipient_user_id.clone()).or_default();
            entry.total_minor += model.amount_minor;
            entry.reimbursement_count += 1;
            entry
                .items
                .push((ItemKind::Reimbursement, parse_uuid(&model.id, "reimbursement")?));
        }

        let open = [
            ReviewStatus::Pending.as_str(),
            ReviewStatus::UnderReview.as_str(),
            ReviewStatus::Approved.as_str(),
        ];
        let debit_models = charges::Entity::find()
            .filter(charges::Column::FundId.is_in(fund_ids))
            .filter(charges::Column::Status.is_in(open))
            .all(db_tx)
            .await?;
        for model in debit_models {
            let entry = groups.entry(model.recipient_user_id.clone()).or_default();
            entry.total_minor -= model.amount_minor;
            entry
                .items
                .push((ItemKind::Charge, parse_uuid(&model.id, "charge")?));
        }

        Ok(groups)
    }

    async fn pending_transfers_by_recipient(
        &self,
        db_tx: &DatabaseTransaction,
        scope: &BudgetScope,
    ) -> ResultEngine<BTreeMap<String, payment_transfers::Model>> {
        let mut query = payment_transfers::Entity::find()
            .filter(payment_transfers::Column::Status.eq(TransferStatus::Pending.as_str()))
            .filter(payment_transfers::Column::BudgetType.eq(scope.budget_type().as_str()));
        query = match scope.group_id() {
            Some(group_id) => {
                query.filter(payment_transfers::Column::GroupId.eq(group_id.to_string()))
            }
            None => query.filter(payment_transfers::Column::GroupId.is_null()),
        };

        let models = query.all(db_tx).await?;
        Ok(models
            .into_iter()
            .map(|m| (m.recipient_user_id.clone(), m))
            .collect())
    }

    async fn replace_items(
        &self,
        db_tx: &DatabaseTransaction,
        transfer_id: &str,
        items: &[(ItemKind, Uuid)],
    ) -> ResultEngine<()> {
        transfer_items::Entity::delete_many()
            .filter(transfer_items::Column::TransferId.eq(transfer_id.to_string()))
            .exec(db_tx)
            .await?;

        let transfer_uuid = parse_uuid(transfer_id, "payment transfer")?;
        for (kind, item_id) in items {
            let item = TransferItem::new(transfer_uuid, *kind, *item_id);
            transfer_items::ActiveModel::from(&item).insert(db_tx).await?;
        }
        Ok(())
    }
}
