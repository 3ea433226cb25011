//! Budget scopes.
//!
//! A budget is visible either to the whole circle or to a single group. Every
//! engine operation that touches funds or transfers takes a [`BudgetScope`]
//! and verifies its targets belong to it before mutating anything.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    Circle,
    Group,
}

impl BudgetType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Group => "group",
        }
    }
}

impl TryFrom<&str> for BudgetType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "circle" => Ok(Self::Circle),
            "group" => Ok(Self::Group),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid budget type: {other}"
            ))),
        }
    }
}

/// The visibility boundary an operation runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetScope {
    Circle,
    Group(Uuid),
}

impl BudgetScope {
    pub fn budget_type(self) -> BudgetType {
        match self {
            Self::Circle => BudgetType::Circle,
            Self::Group(_) => BudgetType::Group,
        }
    }

    pub fn group_id(self) -> Option<Uuid> {
        match self {
            Self::Circle => None,
            Self::Group(id) => Some(id),
        }
    }
}
