//! Scope and existence checks shared by the engine operations.
//!
//! The engine trusts the caller's scope (authorization lives outside) but
//! still verifies every targeted row actually belongs to that scope before
//! mutating it. Rows outside the scope are reported as not found.

use sea_orm::{DatabaseTransaction, QueryFilter, QuerySelect, prelude::*};
use uuid::Uuid;

use crate::{BudgetScope, EngineError, ResultEngine, budgets, funds, payment_transfers, users};

use super::Engine;

impl Engine {
    pub(super) async fn require_budget(
        &self,
        db: &DatabaseTransaction,
        budget_id: Uuid,
    ) -> ResultEngine<budgets::Model> {
        budgets::Entity::find_by_id(budget_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("budget".to_string()))
    }

    pub(super) async fn require_fund(
        &self,
        db: &DatabaseTransaction,
        fund_id: Uuid,
    ) -> ResultEngine<funds::Model> {
        funds::Entity::find_by_id(fund_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("fund".to_string()))
    }

    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::NotFound("user".to_string()));
        }
        Ok(())
    }

    fn scope_matches(scope: &BudgetScope, budget: &budgets::Model) -> bool {
        budget.budget_type == scope.budget_type().as_str()
            && budget.group_id == scope.group_id().map(|id| id.to_string())
    }

    /// Ids of every budget visible in `scope`.
    pub(super) async fn scope_budget_ids(
        &self,
        db: &DatabaseTransaction,
        scope: &BudgetScope,
    ) -> ResultEngine<Vec<String>> {
        let mut query = budgets::Entity::find()
            .select_only()
            .column(budgets::Column::Id)
            .filter(budgets::Column::BudgetType.eq(scope.budget_type().as_str()));
        query = match scope.group_id() {
            Some(group_id) => query.filter(budgets::Column::GroupId.eq(group_id.to_string())),
            None => query.filter(budgets::Column::GroupId.is_null()),
        };
        let ids: Vec<String> = query.into_tuple::<String>().all(db).await?;
        Ok(ids)
    }

    /// Ids of every fund whose budget is visible in `scope`.
    pub(super) async fn scope_fund_ids(
        &self,
        db: &DatabaseTransaction,
        scope: &BudgetScope,
    ) -> ResultEngine<Vec<String>> {
        let budget_ids = self.scope_budget_ids(db, scope).await?;
        if budget_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = funds::Entity::find()
            .select_only()
            .column(funds::Column::Id)
            .filter(funds::Column::BudgetId.is_in(budget_ids))
            .into_tuple()
            .all(db)
            .await?;
        Ok(ids)
    }

    pub(super) async fn require_fund_in_scope(
        &self,
        db: &DatabaseTransaction,
        fund_id: Uuid,
        scope: &BudgetScope,
    ) -> ResultEngine<funds::Model> {
        let fund = self.require_fund(db, fund_id).await?;
        let budget = budgets::Entity::find_by_id(fund.budget_id.clone())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("budget".to_string()))?;
        if !Self::scope_matches(scope, &budget) {
            return Err(EngineError::NotFound("fund".to_string()));
        }
        Ok(fund)
    }

    pub(super) async fn require_transfer_in_scope(
        &self,
        db: &DatabaseTransaction,
        transfer_id: Uuid,
        scope: &BudgetScope,
    ) -> ResultEngine<payment_transfers::Model> {
        let model = payment_transfers::Entity::find_by_id(transfer_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("payment transfer".to_string()))?;
        if model.budget_type != scope.budget_type().as_str()
            || model.group_id != scope.group_id().map(|id| id.to_string())
        {
            return Err(EngineError::NotFound("payment transfer".to_string()));
        }
        Ok(model)
    }
}
