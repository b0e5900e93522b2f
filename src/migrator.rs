use sea_orm_migration::prelude::*;

/// Embedded migrator.
///
/// The Pagila schema itself is provisioned out of band (the service refuses
/// to guess at it); migrations here only add what this service needs on top.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250801_000001_create_open_rental_index::Migration,
        )]
    }
}

mod m20250801_000001_create_open_rental_index {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250801_000001_create_open_rental_index"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        /// Enforces at most one open rental per inventory unit. Concurrent
        /// check-then-insert races surface as unique-constraint violations,
        /// which the rental service maps to a conflict.
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .get_connection()
                .execute_unprepared(
                    "CREATE UNIQUE INDEX IF NOT EXISTS idx_rental_open_inventory \
                     ON rental (inventory_id) WHERE return_date IS NULL",
                )
                .await?;
            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .get_connection()
                .execute_unprepared("DROP INDEX IF EXISTS idx_rental_open_inventory")
                .await?;
            Ok(())
        }
    }
}
