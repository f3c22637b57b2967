pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::DatabaseConnection;

mod m20250901_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_init::Migration)]
    }
}

/// Apply all pending migrations. Single entrypoint used by the server
/// bootstrap and by the test harness.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let before = Migrator::get_pending_migrations(db).await?.len();
    tracing::info!(pending = before, "running migrations");
    Migrator::up(db, None).await?;
    tracing::info!(applied = before, "migrations complete");
    Ok(())
}
