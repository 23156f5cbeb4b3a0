use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `complaints` table and its columns.
#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    CreatorId,
    Subject,
    Description,
    Status,
    Details,
    IsResolved,
    ResolvedOn,
    ContractId,
    ClientId,
    LawyerId,
    AdminId,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaints::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaints::CreatorId).uuid().not_null())
                    .col(ColumnDef::new(Complaints::Subject).string().not_null())
                    .col(ColumnDef::new(Complaints::Description).text().not_null())
                    .col(ColumnDef::new(Complaints::Status).string().not_null())
                    .col(ColumnDef::new(Complaints::Details).text())
                    .col(
                        ColumnDef::new(Complaints::IsResolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Complaints::ResolvedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(Complaints::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Complaints::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Complaints::LawyerId).uuid().not_null())
                    .col(ColumnDef::new(Complaints::AdminId).uuid())
                    .col(
                        ColumnDef::new(Complaints::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaints::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaints_contract_id")
                            .from(Complaints::Table, Complaints::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaints_admin_id")
                            .from(Complaints::Table, Complaints::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await
    }
}
