use sea_orm_migration::prelude::*;

use crate::m20260108_091500_budgets::Funds;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Reimbursements {
    Table,
    Id,
    FundId,
    UserId,
    RecipientUserId,
    AmountMinor,
    Description,
    ExpenseDate,
    Status,
    ReceiptUrl,
    ReviewerId,
    ReviewedAt,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum Charges {
    Table,
    Id,
    FundId,
    UserId,
    RecipientUserId,
    AmountMinor,
    Description,
    ExpenseDate,
    Status,
    ReceiptUrl,
    ReviewerId,
    ReviewedAt,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum DirectExpenses {
    Table,
    Id,
    FundId,
    UserId,
    AmountMinor,
    Description,
    ExpenseDate,
    ApartmentId,
    CreatedAt,
}

#[derive(Iden)]
enum PlannedExpenses {
    Table,
    Id,
    FundId,
    AmountMinor,
    Description,
    PlannedDate,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reimbursements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reimbursements::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reimbursements::FundId).string().not_null())
                    .col(ColumnDef::new(Reimbursements::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Reimbursements::RecipientUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reimbursements::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reimbursements::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reimbursements::ExpenseDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reimbursements::Status).string().not_null())
                    .col(ColumnDef::new(Reimbursements::ReceiptUrl).string())
                    .col(ColumnDef::new(Reimbursements::ReviewerId).string())
                    .col(ColumnDef::new(Reimbursements::ReviewedAt).timestamp())
                    .col(ColumnDef::new(Reimbursements::Notes).string())
                    .col(
                        ColumnDef::new(Reimbursements::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reimbursements-fund_id")
                            .from(Reimbursements::Table, Reimbursements::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-reimbursements-fund_id-status")
                    .table(Reimbursements::Table)
                    .col(Reimbursements::FundId)
                    .col(Reimbursements::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Charges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Charges::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Charges::FundId).string().not_null())
                    .col(ColumnDef::new(Charges::UserId).string().not_null())
                    .col(ColumnDef::new(Charges::RecipientUserId).string().not_null())
                    .col(ColumnDef::new(Charges::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Charges::Description).string().not_null())
                    .col(ColumnDef::new(Charges::ExpenseDate).date().not_null())
                    .col(ColumnDef::new(Charges::Status).string().not_null())
                    .col(ColumnDef::new(Charges::ReceiptUrl).string())
                    .col(ColumnDef::new(Charges::ReviewerId).string())
                    .col(ColumnDef::new(Charges::ReviewedAt).timestamp())
                    .col(ColumnDef::new(Charges::Notes).string())
                    .col(ColumnDef::new(Charges::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-charges-fund_id")
                            .from(Charges::Table, Charges::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-charges-fund_id-status")
                    .table(Charges::Table)
                    .col(Charges::FundId)
                    .col(Charges::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DirectExpenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DirectExpenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DirectExpenses::FundId).string().not_null())
                    .col(ColumnDef::new(DirectExpenses::UserId).string().not_null())
                    .col(
                        ColumnDef::new(DirectExpenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DirectExpenses::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DirectExpenses::ExpenseDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DirectExpenses::ApartmentId).string())
                    .col(
                        ColumnDef::new(DirectExpenses::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-direct_expenses-fund_id")
                            .from(DirectExpenses::Table, DirectExpenses::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-direct_expenses-fund_id")
                    .table(DirectExpenses::Table)
                    .col(DirectExpenses::FundId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlannedExpenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlannedExpenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlannedExpenses::FundId).string().not_null())
                    .col(
                        ColumnDef::new(PlannedExpenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlannedExpenses::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlannedExpenses::PlannedDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlannedExpenses::Status).string().not_null())
                    .col(
                        ColumnDef::new(PlannedExpenses::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-planned_expenses-fund_id")
                            .from(PlannedExpenses::Table, PlannedExpenses::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-planned_expenses-fund_id")
                    .table(PlannedExpenses::Table)
                    .col(PlannedExpenses::FundId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlannedExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DirectExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Charges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reimbursements::Table).to_owned())
            .await?;
        Ok(())
    }
}
