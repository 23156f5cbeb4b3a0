use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contracts` table and its columns.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
    CreatorId,
    Title,
    Description,
    Price,
    IsPaid,
    PaidOn,
    IsAccepted,
    AcceptedOn,
    IsEnded,
    EndedOn,
    EndedReason,
    LawyerId,
    ClientId,
    ReviewId,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::CreatorId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::Title).string().not_null())
                    .col(ColumnDef::new(Contracts::Description).text().not_null())
                    .col(ColumnDef::new(Contracts::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(Contracts::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contracts::PaidOn).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::IsAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contracts::AcceptedOn).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::IsEnded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contracts::EndedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(Contracts::EndedReason).text())
                    .col(ColumnDef::new(Contracts::LawyerId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::ReviewId).uuid())
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_lawyer_id")
                            .from(Contracts::Table, Contracts::LawyerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_client_id")
                            .from(Contracts::Table, Contracts::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_review_id")
                            .from(Contracts::Table, Contracts::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}
