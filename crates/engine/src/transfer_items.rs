//! Weak back-references from a payment transfer to the records it nets.
//!
//! The join rows only carry `(kind, id)` pairs; ownership of the underlying
//! reimbursements and charges stays with their own tables.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Reimbursement,
    Charge,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reimbursement => "reimbursement",
            Self::Charge => "charge",
        }
    }
}

impl TryFrom<&str> for ItemKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "reimbursement" => Ok(Self::Reimbursement),
            "charge" => Ok(Self::Charge),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid transfer item kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferItem {
    pub id: Uuid,
    pub transfer_id: Uuid,
    pub kind: ItemKind,
    pub item_id: Uuid,
}

impl TransferItem {
    pub fn new(transfer_id: Uuid, kind: ItemKind, item_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            transfer_id,
            kind,
            item_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transfer_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub transfer_id: String,
    pub item_kind: String,
    pub item_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payment_transfers::Entity",
        from = "Column::TransferId",
        to = "super::payment_transfers::Column::Id"
    )]
    PaymentTransfers,
}

impl Related<super::payment_transfers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentTransfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&TransferItem> for ActiveModel {
    fn from(item: &TransferItem) -> Self {
        Self {
            id: ActiveValue::Set(item.id.to_string()),
            transfer_id: ActiveValue::Set(item.transfer_id.to_string()),
            item_kind: ActiveValue::Set(item.kind.as_str().to_string()),
            item_id: ActiveValue::Set(item.item_id.to_string()),
        }
    }
}

impl TryFrom<Model> for TransferItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "transfer item")?,
            transfer_id: parse_uuid(&model.transfer_id, "payment transfer")?,
            kind: ItemKind::try_from(model.item_kind.as_str())?,
            item_id: parse_uuid(&model.item_id, "item")?,
        })
    }
}
