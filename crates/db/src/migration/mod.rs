//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The schema definitions use
//! the backend-agnostic DSL so the same migrations run on PostgreSQL in
//! production and SQLite in tests.

pub use sea_orm_migration::prelude::*;

mod m20260115_000001_inquiries;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260115_000001_inquiries::Migration)]
    }
}
