//! Review lifecycle shared by reimbursements and charges.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Status of a reviewed record.
///
/// `pending → under_review → approved | rejected`; `paid` is terminal and is
/// set only by transfer execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Paid,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
        }
    }

    /// Terminal statuses can never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Paid)
    }

    /// A charge in one of these statuses still counts as owed in netting.
    pub fn is_open_debt(self) -> bool {
        matches!(self, Self::Pending | Self::UnderReview | Self::Approved)
    }
}

impl TryFrom<&str> for ReviewStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "paid" => Ok(Self::Paid),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid review status: {other}"
            ))),
        }
    }
}

/// Reviewer verdicts on a pending record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    StartReview,
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartReview => "start_review",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// Status of a planned expense line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedStatus {
    Planned,
    Committed,
    Cancelled,
}

impl PlannedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Committed => "committed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for PlannedStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "planned" => Ok(Self::Planned),
            "committed" => Ok(Self::Committed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid planned status: {other}"
            ))),
        }
    }
}
