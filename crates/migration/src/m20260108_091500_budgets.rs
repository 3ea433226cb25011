use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Budgets {
    Table,
    Id,
    Name,
    BudgetType,
    GroupId,
    CreatedAt,
}

#[derive(Iden)]
pub enum Funds {
    Table,
    Id,
    BudgetId,
    Name,
    Archived,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::Name).string().not_null())
                    .col(ColumnDef::new(Budgets::BudgetType).string().not_null())
                    .col(ColumnDef::new(Budgets::GroupId).string())
                    .col(ColumnDef::new(Budgets::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-budget_type-group_id")
                    .table(Budgets::Table)
                    .col(Budgets::BudgetType)
                    .col(Budgets::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Funds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Funds::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Funds::BudgetId).string().not_null())
                    .col(ColumnDef::new(Funds::Name).string().not_null())
                    .col(
                        ColumnDef::new(Funds::Archived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Funds::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-funds-budget_id")
                            .from(Funds::Table, Funds::BudgetId)
                            .to(Budgets::Table, Budgets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-funds-budget_id")
                    .table(Funds::Table)
                    .col(Funds::BudgetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Funds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        Ok(())
    }
}
