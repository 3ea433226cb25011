use sea_orm_migration::prelude::*;

use crate::m20260108_091500_budgets::Funds;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum PaymentTransfers {
    Table,
    Id,
    RecipientUserId,
    BudgetType,
    GroupId,
    TotalAmountMinor,
    ReimbursementCount,
    Status,
    CreatedAt,
    ExecutedAt,
    ExecutedBy,
}

#[derive(Iden)]
enum TransferItems {
    Table,
    Id,
    TransferId,
    ItemKind,
    ItemId,
}

#[derive(Iden)]
enum RecurringTransfers {
    Table,
    Id,
    RecipientUserId,
    FundId,
    AmountMinor,
    Description,
    Frequency,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentTransfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentTransfers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransfers::RecipientUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransfers::BudgetType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTransfers::GroupId).string())
                    .col(
                        ColumnDef::new(PaymentTransfers::TotalAmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransfers::ReimbursementCount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTransfers::Status).string().not_null())
                    .col(
                        ColumnDef::new(PaymentTransfers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTransfers::ExecutedAt).timestamp())
                    .col(ColumnDef::new(PaymentTransfers::ExecutedBy).string())
                    .to_owned(),
            )
            .await?;

        // One pending transfer per recipient and scope; lookups by scope.
        manager
            .create_index(
                Index::create()
                    .name("idx-payment_transfers-scope-status")
                    .table(PaymentTransfers::Table)
                    .col(PaymentTransfers::BudgetType)
                    .col(PaymentTransfers::GroupId)
                    .col(PaymentTransfers::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransferItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransferItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TransferItems::TransferId).string().not_null())
                    .col(ColumnDef::new(TransferItems::ItemKind).string().not_null())
                    .col(ColumnDef::new(TransferItems::ItemId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transfer_items-transfer_id")
                            .from(TransferItems::Table, TransferItems::TransferId)
                            .to(PaymentTransfers::Table, PaymentTransfers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transfer_items-transfer_id")
                    .table(TransferItems::Table)
                    .col(TransferItems::TransferId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecurringTransfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecurringTransfers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecurringTransfers::RecipientUserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTransfers::FundId).string().not_null())
                    .col(
                        ColumnDef::new(RecurringTransfers::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecurringTransfers::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecurringTransfers::Frequency)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTransfers::StartDate).date().not_null())
                    .col(ColumnDef::new(RecurringTransfers::EndDate).date())
                    .col(ColumnDef::new(RecurringTransfers::Status).string().not_null())
                    .col(
                        ColumnDef::new(RecurringTransfers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recurring_transfers-fund_id")
                            .from(RecurringTransfers::Table, RecurringTransfers::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-recurring_transfers-status")
                    .table(RecurringTransfers::Table)
                    .col(RecurringTransfers::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecurringTransfers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransferItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentTransfers::Table).to_owned())
            .await?;
        Ok(())
    }
}
