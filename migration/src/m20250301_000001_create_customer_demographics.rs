use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Enable foreign keys for SQLite
        if manager.get_database_backend() == sea_orm::DatabaseBackend::Sqlite {
            manager
                .get_connection()
                .execute_unprepared("PRAGMA foreign_keys = ON")
                .await?;
        }

        // The store, not the entity, rejects empty or over-long identifiers.
        manager
            .create_table(
                Table::create()
                    .table(CustomerDemographics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerDemographics::CustomerTypeId)
                            .string_len(10)
                            .not_null()
                            .primary_key()
                            .check(Expr::cust("length(customer_type_id) BETWEEN 1 AND 10")),
                    )
                    .col(text_null(CustomerDemographics::CustomerDesc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerDemographics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum CustomerDemographics {
    Table,
    CustomerTypeId,
    CustomerDesc,
}
