use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users;
mod m20250801_000002_create_polls;
mod m20250801_000003_create_poll_options;
mod m20250801_000004_create_votes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_users::Migration),
            Box::new(m20250801_000002_create_polls::Migration),
            Box::new(m20250801_000003_create_poll_options::Migration),
            Box::new(m20250801_000004_create_votes::Migration),
        ]
    }
}
