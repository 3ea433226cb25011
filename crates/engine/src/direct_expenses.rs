//! Direct expense primitives.
//!
//! Treasurer-entered expenses that bypass the review flow. They never take
//! part in netting; the fund movement tool is the only operation that touches
//! them after creation.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    util::{parse_uuid, validate_amount_minor},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectExpense {
    pub id: Uuid,
    pub fund_id: Uuid,
    pub user_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub expense_date: NaiveDate,
    pub apartment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl DirectExpense {
    pub fn new(
        fund_id: Uuid,
        user_id: String,
        amount_minor: i64,
        description: String,
        expense_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        validate_amount_minor(amount_minor)?;
        Ok(Self {
            id: Uuid::new_v4(),
            fund_id,
            user_id,
            amount_minor,
            description,
            expense_date,
            apartment_id: None,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "direct_expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub fund_id: String,
    pub user_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub expense_date: Date,
    pub apartment_id: Option<String>,
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

impl From<&DirectExpense> for ActiveModel {
    fn from(e: &DirectExpense) -> Self {
        Self {
            id: ActiveValue::Set(e.id.to_string()),
            fund_id: ActiveValue::Set(e.fund_id.to_string()),
            user_id: ActiveValue::Set(e.user_id.clone()),
            amount_minor: ActiveValue::Set(e.amount_minor),
            description: ActiveValue::Set(e.description.clone()),
            expense_date: ActiveValue::Set(e.expense_date),
            apartment_id: ActiveValue::Set(e.apartment_id.map(|id| id.to_string())),
            created_at: ActiveValue::Set(e.created_at),
        }
    }
}

impl TryFrom<Model> for DirectExpense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "direct expense")?,
            fund_id: parse_uuid(&model.fund_id, "fund")?,
            user_id: model.user_id,
            amount_minor: model.amount_minor,
            description: model.description,
            expense_date: model.expense_date,
            apartment_id: model
                .apartment_id
                .as_deref()
                .map(|id| parse_uuid(id, "apartment"))
                .transpose()?,
            created_at: model.created_at,
        })
    }
}
