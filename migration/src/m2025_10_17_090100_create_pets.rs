//! Migration to create the pets table.
//!
//! Every pet belongs to exactly one customer. Removing a customer removes its
//! pets through the cascading foreign key. Microchip ids are unique when set;
//! NULL microchips never collide.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pets::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Pets::Species).string_len(50).not_null())
                    .col(ColumnDef::new(Pets::Breed).string_len(100).null())
                    .col(ColumnDef::new(Pets::Age).integer().null())
                    .col(ColumnDef::new(Pets::Weight).double().null())
                    .col(ColumnDef::new(Pets::Color).string_len(50).null())
                    .col(ColumnDef::new(Pets::Gender).string_len(10).null())
                    .col(ColumnDef::new(Pets::MicrochipId).string_len(50).null())
                    .col(ColumnDef::new(Pets::Notes).text().null())
                    .col(ColumnDef::new(Pets::CustomerId).integer().not_null())
                    .col(
                        ColumnDef::new(Pets::CreatedAt)
                            .timestamp_with_time_zone()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Pets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pets_customer_id")
                            .from(Pets::Table, Pets::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pets_microchip_id")
                    .table(Pets::Table)
                    .col(Pets::MicrochipId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Detail pages and the cascade both look pets up by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_pets_customer_id")
                    .table(Pets::Table)
                    .col(Pets::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pets_microchip_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_pets_customer_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Pets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pets {
    Table,
    Id,
    Name,
    Species,
    Breed,
    Age,
    Weight,
    Color,
    Gender,
    MicrochipId,
    Notes,
    CustomerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
}
