pub use sea_orm_migration::prelude::*;

mod m20260108_090000_users;
mod m20260108_091500_budgets;
mod m20260115_100000_records;
mod m20260122_140000_transfers;
mod m20260219_110000_recurring_period_key;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260108_090000_users::Migration),
            Box::new(m20260108_091500_budgets::Migration),
            Box::new(m20260115_100000_records::Migration),
            Box::new(m20260122_140000_transfers::Migration),
            Box::new(m20260219_110000_recurring_period_key::Migration),
        ]
    }
}
