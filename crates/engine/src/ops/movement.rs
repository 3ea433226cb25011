//! The fund movement tool.
//!
//! Reassigns a filtered batch of records from one fund to another. In
//! dry-run mode it reports the exact counts a commit with the same arguments
//! would move. Both modes evaluate the same filters inside one transaction,
//! so a dry run followed by a commit with no intervening writes moves
//! exactly the counts it previewed.

use sea_orm::{
    DatabaseTransaction, PaginatorTrait, QueryFilter, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{
    BudgetScope, EngineError, MoveItemsCmd, ResultEngine, direct_expenses, planned_expenses,
    reimbursements,
};

use super::{Engine, with_tx};

/// Moved (or would-move) record counts per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovedCounts {
    pub reimbursements: u64,
    pub planned_expenses: u64,
    pub direct_expenses: u64,
}

/// Result of a movement call, dry run or commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveItemsReport {
    pub dry_run: bool,
    pub source_fund: String,
    pub target_fund: String,
    pub moved: MovedCounts,
}

impl Engine {
    /// Move matching records between two funds of the same scope.
    pub async fn move_fund_items(
        &self,
        scope: BudgetScope,
        cmd: MoveItemsCmd,
    ) -> ResultEngine<MoveItemsReport> {
        if cmd.source_fund_id == cmd.target_fund_id {
            return Err(EngineError::InvalidArgument(
                "source and target fund must differ".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let source = self
                .require_fund_in_scope(&db_tx, cmd.source_fund_id, &scope)
                .await?;
            let target = self
                .require_fund_in_scope(&db_tx, cmd.target_fund_id, &scope)
                .await?;

            let mut moved = MovedCounts::default();
            if cmd.move_reimbursements {
                moved.reimbursements = self.move_reimbursements(&db_tx, &cmd).await?;
            }
            if cmd.move_planned_expenses {
                moved.planned_expenses = self.move_planned_expenses(&db_tx, &cmd).await?;
            }
            if cmd.move_direct_expenses {
                moved.direct_expenses = self.move_direct_expenses(&db_tx, &cmd).await?;
            }

            Ok(MoveItemsReport {
                dry_run: cmd.dry_run,
                source_fund: source.name,
                target_fund: target.name,
                moved,
            })
        })
    }

    async fn move_reimbursements(
        &self,
        db_tx: &DatabaseTransaction,
        cmd: &MoveItemsCmd,
    ) -> ResultEngine<u64> {
        let mut condition = reimbursements::Entity::find()
            .filter(reimbursements::Column::FundId.eq(cmd.source_fund_id.to_string()))
            .filter(reimbursements::Column::ExpenseDate.gte(cmd.from_date));
        if let Some(statuses) = &cmd.reimbursement_statuses
            && !statuses.is_empty()
        {
            let values: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
            condition = condition.filter(reimbursements::Column::Status.is_in(values));
        }

        if cmd.dry_run {
            return Ok(condition.count(db_tx).await?);
        }

        let mut update = reimbursements::Entity::update_many()
            .col_expr(
                reimbursements::Column::FundId,
                Expr::value(cmd.target_fund_id.to_string()),
            )
            .filter(reimbursements::Column::FundId.eq(cmd.source_fund_id.to_string()))
            .filter(reimbursements::Column::ExpenseDate.gte(cmd.from_date));
        if let Some(statuses) = &cmd.reimbursement_statuses
            && !statuses.is_empty()
        {
            let values: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
            update = update.filter(reimbursements::Column::Status.is_in(values));
        }
        Ok(update.exec(db_tx).await?.rows_affected)
    }

    async fn move_planned_expenses(
        &self,
        db_tx: &DatabaseTransaction,
        cmd: &MoveItemsCmd,
    ) -> ResultEngine<u64> {
        let mut condition = planned_expenses::Entity::find()
            .filter(planned_expenses::Column::FundId.eq(cmd.source_fund_id.to_string()))
            .filter(planned_expenses::Column::PlannedDate.gte(cmd.from_date));
        if let Some(statuses) = &cmd.planned_statuses
            && !statuses.is_empty()
        {
            let values: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
            condition = condition.filter(planned_expenses::Column::Status.is_in(values));
        }

        if cmd.dry_run {
            return Ok(condition.count(db_tx).await?);
        }

        let mut update = planned_expenses::Entity::update_many()
            .col_expr(
                planned_expenses::Column::FundId,
                Expr::value(cmd.target_fund_id.to_string()),
            )
            .filter(planned_expenses::Column::FundId.eq(cmd.source_fund_id.to_string()))
            .filter(planned_expenses::Column::PlannedDate.gte(cmd.from_date));
        if let Some(statuses) = &cmd.planned_statuses
            && !statuses.is_empty()
        {
            let values: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
            update = update.filter(planned_expenses::Column::Status.is_in(values));
        }
        Ok(update.exec(db_tx).await?.rows_affected)
    }

    async fn move_direct_expenses(
        &self,
        db_tx: &DatabaseTransaction,
        cmd: &MoveItemsCmd,
    ) -> ResultEngine<u64> {
        let condition = direct_expenses::Entity::find()
            .filter(direct_expenses::Column::FundId.eq(cmd.source_fund_id.to_string()))
            .filter(direct_expenses::Column::ExpenseDate.gte(cmd.from_date));

        if cmd.dry_run {
            return Ok(condition.count(db_tx).await?);
        }

        let update = direct_expenses::Entity::update_many()
            .col_expr(
                direct_expenses::Column::FundId,
                Expr::value(cmd.target_fund_id.to_string()),
            )
            .filter(direct_expenses::Column::FundId.eq(cmd.source_fund_id.to_string()))
            .filter(direct_expenses::Column::ExpenseDate.gte(cmd.from_date));
        Ok(update.exec(db_tx).await?.rows_affected)
    }
}
