pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_accounts;
mod m20260105_000002_create_coursework;
mod m20260105_000003_create_quizzes;
mod m20260105_000004_create_library_and_messaging;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_accounts::Migration),
            Box::new(m20260105_000002_create_coursework::Migration),
            Box::new(m20260105_000003_create_quizzes::Migration),
            Box::new(m20260105_000004_create_library_and_messaging::Migration),
        ]
    }
}
