//! Budget and fund bootstrap operations.

use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Budget, BudgetScope, EngineError, Fund, ResultEngine, budgets, funds,
    util::normalize_required_name,
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a budget for the given scope.
    pub async fn new_budget(
        &self,
        name: &str,
        scope: BudgetScope,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "budget")?;
        let budget = Budget {
            id: Uuid::new_v4(),
            name,
            budget_type: scope.budget_type(),
            group_id: scope.group_id(),
            created_at,
        };

        with_tx!(self, |db_tx| {
            budgets::ActiveModel::from(&budget).insert(&db_tx).await?;
            Ok(budget.id)
        })
    }

    /// Create a fund inside a budget. Fund names are unique per budget.
    pub async fn new_fund(
        &self,
        budget_id: Uuid,
        name: &str,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "fund")?;

        with_tx!(self, |db_tx| {
            self.require_budget(&db_tx, budget_id).await?;

            let duplicate = funds::Entity::find()
                .filter(funds::Column::BudgetId.eq(budget_id.to_string()))
                .filter(funds::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?;
            if duplicate.is_some() {
                return Err(EngineError::Conflict(format!(
                    "fund \"{name}\" already exists in this budget"
                )));
            }

            let fund = Fund {
                id: Uuid::new_v4(),
                budget_id,
                name,
                archived: false,
                created_at,
            };
            funds::ActiveModel::from(&fund).insert(&db_tx).await?;
            Ok(fund.id)
        })
    }

    /// Return a fund visible in `scope`.
    pub async fn fund(&self, scope: BudgetScope, fund_id: Uuid) -> ResultEngine<Fund> {
        with_tx!(self, |db_tx| {
            let model = self.require_fund_in_scope(&db_tx, fund_id, &scope).await?;
            Fund::try_from(model)
        })
    }
}
