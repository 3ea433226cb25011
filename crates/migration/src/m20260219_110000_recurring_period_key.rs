//! Adds the recurring-generation columns to `reimbursements` and the unique
//! `(recurring_transfer_id, period_start)` key that makes generation
//! idempotent even across concurrent runs.

use sea_orm_migration::prelude::*;

use crate::m20260115_100000_records::Reimbursements;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum NewColumns {
    RecurringTransferId,
    PeriodStart,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Reimbursements::Table)
                    .add_column(ColumnDef::new(NewColumns::RecurringTransferId).string())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Reimbursements::Table)
                    .add_column(ColumnDef::new(NewColumns::PeriodStart).date())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq-reimbursements-recurring-period")
                    .table(Reimbursements::Table)
                    .col(NewColumns::RecurringTransferId)
                    .col(NewColumns::PeriodStart)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uniq-reimbursements-recurring-period")
                    .table(Reimbursements::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Reimbursements::Table)
                    .drop_column(NewColumns::PeriodStart)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Reimbursements::Table)
                    .drop_column(NewColumns::RecurringTransferId)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
