//! Payment transfer primitives.
//!
//! A `PaymentTransfer` is the netting output for one recipient in one budget
//! scope: the signed balance of their approved reimbursements minus their
//! open charges. A recipient has at most one `pending` transfer per scope at
//! a time; refresh updates it in place. The transfer holds weak references to
//! the records it aggregates (see [`super::transfer_items`]), never the
//! records themselves.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BudgetType, EngineError, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Executed,
}

impl TransferStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Executed => "executed",
        }
    }
}

impl TryFrom<&str> for TransferStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "executed" => Ok(Self::Executed),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid transfer status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransfer {
    pub id: Uuid,
    pub recipient_user_id: String,
    pub budget_type: BudgetType,
    pub group_id: Option<Uuid>,
    /// Signed: positive means the circle owes the member, negative the
    /// member owes the circle.
    pub total_amount_minor: i64,
    pub reimbursement_count: i64,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
    pub executed_at: Option<DateTime<Utc>>,
    pub executed_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub recipient_user_id: String,
    pub budget_type: String,
    pub group_id: Option<String>,
    pub total_amount_minor: i64,
    pub reimbursement_count: i64,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub executed_at: Option<DateTimeUtc>,
    pub executed_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transfer_items::Entity")]
    TransferItems,
}

impl Related<super::transfer_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransferItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PaymentTransfer> for ActiveModel {
    fn from(t: &PaymentTransfer) -> Self {
        Self {
            id: ActiveValue::Set(t.id.to_string()),
            recipient_user_id: ActiveValue::Set(t.recipient_user_id.clone()),
            budget_type: ActiveValue::Set(t.budget_type.as_str().to_string()),
            group_id: ActiveValue::Set(t.group_id.map(|id| id.to_string())),
            total_amount_minor: ActiveValue::Set(t.total_amount_minor),
            reimbursement_count: ActiveValue::Set(t.reimbursement_count),
            status: ActiveValue::Set(t.status.as_str().to_string()),
            created_at: ActiveValue::Set(t.created_at),
            executed_at: ActiveValue::Set(t.executed_at),
            executed_by: ActiveValue::Set(t.executed_by.clone()),
        }
    }
}

impl TryFrom<Model> for PaymentTransfer {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "payment transfer")?,
            recipient_user_id: model.recipient_user_id,
            budget_type: BudgetType::try_from(model.budget_type.as_str())?,
            group_id: model
                .group_id
                .as_deref()
                .map(|id| parse_uuid(id, "group"))
                .transpose()?,
            total_amount_minor: model.total_amount_minor,
            reimbursement_count: model.reimbursement_count,
            status: TransferStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
            executed_at: model.executed_at,
            executed_by: model.executed_by,
        })
    }
}
