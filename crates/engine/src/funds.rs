//! Fund primitives.
//!
//! A `Fund` is the allocation container every financial record belongs to.
//! Records change fund only through the fund movement tool.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub name: String,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "funds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub archived: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id"
    )]
    Budgets,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Fund> for ActiveModel {
    fn from(fund: &Fund) -> Self {
        Self {
            id: ActiveValue::Set(fund.id.to_string()),
            budget_id: ActiveValue::Set(fund.budget_id.to_string()),
            name: ActiveValue::Set(fund.name.clone()),
            archived: ActiveValue::Set(fund.archived),
            created_at: ActiveValue::Set(fund.created_at),
        }
    }
}

impl TryFrom<Model> for Fund {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "fund")?,
            budget_id: parse_uuid(&model.budget_id, "budget")?,
            name: model.name,
            archived: model.archived,
            created_at: model.created_at,
        })
    }
}
