//! Reimbursement primitives.
//!
//! A `Reimbursement` is a credit the circle owes a member. Only `approved`
//! reimbursements are eligible for netting; `paid` is set exclusively by
//! transfer execution. Records generated from a recurring template carry the
//! `(recurring_transfer_id, period_start)` pair that keys idempotent
//! generation.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, ReviewStatus,
    util::{parse_uuid, validate_amount_minor},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reimbursement {
    pub id: Uuid,
    pub fund_id: Uuid,
    pub user_id: String,
    pub recipient_user_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub expense_date: NaiveDate,
    pub status: ReviewStatus,
    pub receipt_url: Option<String>,
    pub reviewer_id: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub recurring_transfer_id: Option<Uuid>,
    pub period_start: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Reimbursement {
    pub fn new(
        fund_id: Uuid,
        user_id: String,
        recipient_user_id: String,
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
            recipient_user_id,
            amount_minor,
            description,
            expense_date,
            status: ReviewStatus::Pending,
            receipt_url: None,
            reviewer_id: None,
            reviewed_at: None,
            notes: None,
            recurring_transfer_id: None,
            period_start: None,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reimbursements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub fund_id: String,
    pub user_id: String,
    pub recipient_user_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub expense_date: Date,
    pub status: String,
    pub receipt_url: Option<String>,
    pub reviewer_id: Option<String>,
    pub reviewed_at: Option<DateTimeUtc>,
    pub notes: Option<String>,
    pub recurring_transfer_id: Option<String>,
    pub period_start: Option<Date>,
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

impl From<&Reimbursement> for ActiveModel {
    fn from(r: &Reimbursement) -> Self {
        Self {
            id: ActiveValue::Set(r.id.to_string()),
            fund_id: ActiveValue::Set(r.fund_id.to_string()),
            user_id: ActiveValue::Set(r.user_id.clone()),
            recipient_user_id: ActiveValue::Set(r.recipient_user_id.clone()),
            amount_minor: ActiveValue::Set(r.amount_minor),
            description: ActiveValue::Set(r.description.clone()),
            expense_date: ActiveValue::Set(r.expense_date),
            status: ActiveValue::Set(r.status.as_str().to_string()),
            receipt_url: ActiveValue::Set(r.receipt_url.clone()),
            reviewer_id: ActiveValue::Set(r.reviewer_id.clone()),
            reviewed_at: ActiveValue::Set(r.reviewed_at),
            notes: ActiveValue::Set(r.notes.clone()),
            recurring_transfer_id: ActiveValue::Set(
                r.recurring_transfer_id.map(|id| id.to_string()),
            ),
            period_start: ActiveValue::Set(r.period_start),
            created_at: ActiveValue::Set(r.created_at),
        }
    }
}

impl TryFrom<Model> for Reimbursement {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "reimbursement")?,
            fund_id: parse_uuid(&model.fund_id, "fund")?,
            user_id: model.user_id,
            recipient_user_id: model.recipient_user_id,
            amount_minor: model.amount_minor,
            description: model.description,
            expense_date: model.expense_date,
            status: ReviewStatus::try_from(model.status.as_str())?,
            receipt_url: model.receipt_url,
            reviewer_id: model.reviewer_id,
            reviewed_at: model.reviewed_at,
            notes: model.notes,
            recurring_transfer_id: model
                .recurring_transfer_id
                .as_deref()
                .map(|id| parse_uuid(id, "recurring transfer"))
                .transpose()?,
            period_start: model.period_start,
            created_at: model.created_at,
        })
    }
}
