//! Reconciliation engine for the shared treasury.
//!
//! The engine owns four operations over the ledger store: netting open
//! records into pending payment transfers ([`Engine::refresh_transfers`]),
//! executing a pending transfer ([`Engine::execute_transfer`]), generating
//! recurring credits ([`Engine::generate_recurring`]) and moving record
//! batches between funds ([`Engine::move_fund_items`]), plus the record
//! lifecycle and read projections around them. Every operation runs inside a
//! single database transaction; failures roll the whole batch back.

pub use budgets::Budget;
pub use charges::Charge;
pub use commands::{
    DirectExpenseCmd, MoveItemsCmd, PlannedExpenseCmd, RecurringTransferCmd, SubmitChargeCmd,
    SubmitReimbursementCmd,
};
pub use direct_expenses::DirectExpense;
pub use error::EngineError;
pub use funds::Fund;
pub use ops::{
    Engine, EngineBuilder, MoveItemsReport, MovedCounts, TransferExecution, TransferListFilter,
    TransferStats,
};
pub use payment_transfers::{PaymentTransfer, TransferStatus};
pub use period::Frequency;
pub use planned_expenses::PlannedExpense;
pub use recurring_transfers::{RecurringStatus, RecurringTransfer};
pub use reimbursements::Reimbursement;
pub use scope::{BudgetScope, BudgetType};
pub use status::{PlannedStatus, ReviewAction, ReviewStatus};
pub use transfer_items::{ItemKind, TransferItem};

pub mod budgets;
pub mod charges;
mod commands;
pub mod direct_expenses;
mod error;
pub mod funds;
mod ops;
pub mod payment_transfers;
mod period;
pub mod planned_expenses;
pub mod recurring_transfers;
pub mod reimbursements;
mod scope;
mod status;
pub mod transfer_items;
pub mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
