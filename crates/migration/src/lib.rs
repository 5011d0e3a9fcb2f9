pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_teams_table;
mod m20250801_000002_create_submissions_table;

pub(crate) use m20250801_000001_create_teams_table::Teams;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_teams_table::Migration),
            Box::new(m20250801_000002_create_submissions_table::Migration),
        ]
    }
}
