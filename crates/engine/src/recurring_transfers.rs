//! Recurring transfer templates.
//!
//! A template describes a credit the generator materializes once per cadence
//! window. The generator reads templates but never mutates them; pausing and
//! editing are treasurer operations.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Frequency, ResultEngine,
    util::{parse_uuid, validate_amount_minor},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringStatus {
    Active,
    Paused,
}

impl RecurringStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

impl TryFrom<&str> for RecurringStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid recurring status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTransfer {
    pub id: Uuid,
    pub recipient_user_id: String,
    pub fund_id: Uuid,
    pub amount_minor: i64,
    pub description: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: RecurringStatus,
    pub created_at: DateTime<Utc>,
}

impl RecurringTransfer {
    pub fn new(
        recipient_user_id: String,
        fund_id: Uuid,
        amount_minor: i64,
        description: String,
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        validate_amount_minor(amount_minor)?;
        if let Some(end) = end_date
            && end < start_date
        {
            return Err(EngineError::InvalidArgument(
                "end_date must not precede start_date".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            recipient_user_id,
            fund_id,
            amount_minor,
            description,
            frequency,
            start_date,
            end_date,
            status: RecurringStatus::Active,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recurring_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub recipient_user_id: String,
    pub fund_id: String,
    pub amount_minor: i64,
    pub description: String,
    pub frequency: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
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

impl From<&RecurringTransfer> for ActiveModel {
    fn from(t: &RecurringTransfer) -> Self {
        Self {
            id: ActiveValue::Set(t.id.to_string()),
            recipient_user_id: ActiveValue::Set(t.recipient_user_id.clone()),
            fund_id: ActiveValue::Set(t.fund_id.to_string()),
            amount_minor: ActiveValue::Set(t.amount_minor),
            description: ActiveValue::Set(t.description.clone()),
            frequency: ActiveValue::Set(t.frequency.as_str().to_string()),
            start_date: ActiveValue::Set(t.start_date),
            end_date: ActiveValue::Set(t.end_date),
            status: ActiveValue::Set(t.status.as_str().to_string()),
            created_at: ActiveValue::Set(t.created_at),
        }
    }
}

impl TryFrom<Model> for RecurringTransfer {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "recurring transfer")?,
            recipient_user_id: model.recipient_user_id,
            fund_id: parse_uuid(&model.fund_id, "fund")?,
            amount_minor: model.amount_minor,
            description: model.description,
            frequency: Frequency::try_from(model.frequency.as_str())?,
            start_date: model.start_date,
            end_date: model.end_date,
            status: RecurringStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
        })
    }
}
