use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_customer_demographics::CustomerDemographics;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerCustomerDemo::Table)
                    .if_not_exists()
                    .col(string(CustomerCustomerDemo::CustomerId))
                    .col(
                        ColumnDef::new(CustomerCustomerDemo::CustomerTypeId)
                            .string_len(10)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CustomerCustomerDemo::CustomerId)
                            .col(CustomerCustomerDemo::CustomerTypeId),
                    )
                    // Deleting a category with linked customers is refused here;
                    // cascading is an explicit storage decision.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_customer_demo_type")
                            .from(
                                CustomerCustomerDemo::Table,
                                CustomerCustomerDemo::CustomerTypeId,
                            )
                            .to(
                                CustomerDemographics::Table,
                                CustomerDemographics::CustomerTypeId,
                            )
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on customer_type_id for "all customers of a category" lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customer_customer_demo_type")
                    .table(CustomerCustomerDemo::Table)
                    .col(CustomerCustomerDemo::CustomerTypeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerCustomerDemo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomerCustomerDemo {
    Table,
    CustomerId,
    CustomerTypeId,
}
