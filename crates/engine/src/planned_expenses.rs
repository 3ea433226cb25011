//! Planned expense primitives.
//!
//! Forecast lines. Excluded from netting; moveable between funds.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, PlannedStatus, ResultEngine,
    util::{parse_uuid, validate_amount_minor},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExpense {
    pub id: Uuid,
    pub fund_id: Uuid,
    pub amount_minor: i64,
    pub description: String,
    pub planned_date: NaiveDate,
    pub status: PlannedStatus,
    pub created_at: DateTime<Utc>,
}

impl PlannedExpense {
    pub fn new(
        fund_id: Uuid,
        amount_minor: i64,
        description: String,
        planned_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        validate_amount_minor(amount_minor)?;
        Ok(Self {
            id: Uuid::new_v4(),
            fund_id,
            amount_minor,
            description,
            planned_date,
            status: PlannedStatus::Planned,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "planned_expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub fund_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub planned_date: Date,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::funds::Entity",
        from = "Column::FundId",
        to = "super::funds::Column::Id"
    )]
    Funds,
}

impl Related<super::funds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Funds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PlannedExpense> for ActiveModel {
    fn from(e: &PlannedExpense) -> Self {
        Self {
            id: ActiveValue::Set(e.id.to_string()),
            fund_id: ActiveValue::Set(e.fund_id.to_string()),
            amount_minor: ActiveValue::Set(e.amount_minor),
            description: ActiveValue::Set(e.description.clone()),
            planned_date: ActiveValue::Set(e.planned_date),
            status: ActiveValue::Set(e.status.as_str().to_string()),
            created_at: ActiveValue::Set(e.created_at),
        }
    }
}

impl TryFrom<Model> for PlannedExpense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "planned expense")?,
            fund_id: parse_uuid(&model.fund_id, "fund")?,
            amount_minor: model.amount_minor,
            description: model.description,
            planned_date: model.planned_date,
            status: PlannedStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
        })
    }
}
