pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_admins_table;
mod m20250301_000003_create_reviews_table;
mod m20250301_000004_create_contracts_table;
mod m20250301_000005_create_complaints_table;
mod m20250301_000006_create_transactions_table;
mod m20250302_000001_create_chat_rooms_table;
mod m20250302_000002_create_messages_table;
mod m20250302_000003_create_skills_tables;
mod m20250303_000001_create_otps_table;
mod m20250303_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_admins_table::Migration),
            Box::new(m20250301_000003_create_reviews_table::Migration),
            Box::new(m20250301_000004_create_contracts_table::Migration),
            Box::new(m20250301_000005_create_complaints_table::Migration),
            Box::new(m20250301_000006_create_transactions_table::Migration),
            Box::new(m20250302_000001_create_chat_rooms_table::Migration),
            Box::new(m20250302_000002_create_messages_table::Migration),
            Box::new(m20250302_000003_create_skills_tables::Migration),
            Box::new(m20250303_000001_create_otps_table::Migration),
            Box::new(m20250303_000002_add_indexes::Migration),
        ]
    }
}
