//! Payment transfer read projections: detail, cursor-paginated listing and
//! scope-wide stats.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    Condition, QueryFilter, QueryOrder, QuerySelect, Statement, TransactionTrait, prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    BudgetScope, EngineError, PaymentTransfer, ResultEngine, TransferItem, TransferStatus,
    payment_transfers, transfer_items,
};

use super::{Engine, with_tx};

/// Filters for listing payment transfers.
#[derive(Clone, Debug, Default)]
pub struct TransferListFilter {
    /// If present, only transfers in this status are returned.
    pub status: Option<TransferStatus>,
}

/// Scope-wide transfer counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStats {
    pub pending_count: i64,
    pub pending_total_minor: i64,
    pub executed_count: i64,
    pub executed_total_minor: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TransfersCursor {
    created_at: DateTime<Utc>,
    transfer_id: String,
}

impl TransfersCursor {
    fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidArgument("invalid transfers cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidArgument("invalid transfers cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidArgument("invalid transfers cursor".to_string()))
    }
}

impl Engine {
    /// Return one transfer of the scope together with its backing item refs.
    pub async fn payment_transfer(
        &self,
        scope: BudgetScope,
        transfer_id: Uuid,
    ) -> ResultEngine<(PaymentTransfer, Vec<TransferItem>)> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_transfer_in_scope(&db_tx, transfer_id, &scope)
                .await?;

            let item_models = transfer_items::Entity::find()
                .filter(transfer_items::Column::TransferId.eq(model.id.clone()))
                .all(&db_tx)
                .await?;
            let mut items = Vec::with_capacity(item_models.len());
            for item_model in item_models {
                items.push(TransferItem::try_from(item_model)?);
            }

            Ok((PaymentTransfer::try_from(model)?, items))
        })
    }

    /// Lists transfers of a scope with cursor-based pagination.
    ///
    /// Pagination is newest → older by `(created_at DESC, transfer_id DESC)`.
    pub async fn list_payment_transfers(
        &self,
        scope: BudgetScope,
        limit: u64,
        cursor: Option<&str>,
        filter: &TransferListFilter,
    ) -> ResultEngine<(Vec<PaymentTransfer>, Option<String>)> {
        with_tx!(self, |db_tx| {
            let limit_plus_one = limit.saturating_add(1);
            let mut query = payment_transfers::Entity::find()
                .filter(payment_transfers::Column::BudgetType.eq(scope.budget_type().as_str()))
                .order_by_desc(payment_transfers::Column::CreatedAt)
                .order_by_desc(payment_transfers::Column::Id)
                .limit(limit_plus_one);
            query = match scope.group_id() {
                Some(group_id) => {
                    query.filter(payment_transfers::Column::GroupId.eq(group_id.to_string()))
                }
                None => query.filter(payment_transfers::Column::GroupId.is_null()),
            };
            if let Some(status) = filter.status {
                query = query.filter(payment_transfers::Column::Status.eq(status.as_str()));
            }

            if let Some(cursor) = cursor {
                let cursor = TransfersCursor::decode(cursor)?;
                query = query.filter(
                    Condition::any()
                        .add(payment_transfers::Column::CreatedAt.lt(cursor.created_at))
                        .add(
                            Condition::all()
                                .add(payment_transfers::Column::CreatedAt.eq(cursor.created_at))
                                .add(payment_transfers::Column::Id.lt(cursor.transfer_id)),
                        ),
                );
            }

            let rows = query.all(&db_tx).await?;
            let has_more = rows.len() > limit as usize;

            let mut out: Vec<PaymentTransfer> = Vec::with_capacity(rows.len().min(limit as usize));
            for model in rows.into_iter().take(limit as usize) {
                out.push(PaymentTransfer::try_from(model)?);
            }

            let next_cursor = out.last().map(|t| TransfersCursor {
                created_at: t.created_at,
                transfer_id: t.id.to_string(),
            });
            let next_cursor = if has_more {
                next_cursor.map(|c| c.encode()).transpose()?
            } else {
                None
            };

            Ok((out, next_cursor))
        })
    }

    /// Returns per-status counts and totals for a scope.
    pub async fn transfer_stats(&self, scope: BudgetScope) -> ResultEngine<TransferStats> {
        let backend = self.database.get_database_backend();
        let (group_cond, group_args): (&str, Vec<Value>) = match scope.group_id() {
            Some(group_id) => (" AND group_id = ?", vec![group_id.to_string().into()]),
            None => (" AND group_id IS NULL", Vec::new()),
        };

        let mut stats = TransferStats::default();
        for status in [TransferStatus::Pending, TransferStatus::Executed] {
            let stmt = Statement::from_sql_and_values(
                backend,
                format!(
                    "SELECT COALESCE(SUM(total_amount_minor), 0) AS total, COUNT(*) AS cnt \
                     FROM payment_transfers \
                     WHERE status = ? AND budget_type = ?{group_cond}"
                ),
                {
                    let mut v: Vec<Value> = Vec::new();
                    v.push(status.as_str().into());
                    v.push(scope.budget_type().as_str().into());
                    v.extend(group_args.clone());
                    v
                },
            );
            let row = self.database.query_one(stmt).await?;
            let total: i64 = row
                .as_ref()
                .and_then(|r| r.try_get("", "total").ok())
                .unwrap_or(0);
            let count: i64 = row
                .as_ref()
                .and_then(|r| r.try_get("", "cnt").ok())
                .unwrap_or(0);
            match status {
                TransferStatus::Pending => {
                    stats.pending_count = count;
                    stats.pending_total_minor = total;
                }
                TransferStatus::Executed => {
                    stats.executed_count = count;
                    stats.executed_total_minor = total;
                }
            }
        }

        Ok(stats)
    }
}
