use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `chat_rooms` table and its columns.
#[derive(DeriveIden)]
enum ChatRooms {
    Table,
    Id,
    Name,
    CreatorId,
    MemberIds,
    LastMessage,
    LastMessageAt,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatRooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatRooms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChatRooms::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ChatRooms::CreatorId).uuid().not_null())
                    .col(ColumnDef::new(ChatRooms::MemberIds).json_binary().not_null())
                    .col(ColumnDef::new(ChatRooms::LastMessage).text())
                    .col(ColumnDef::new(ChatRooms::LastMessageAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ChatRooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatRooms::Table).to_owned())
            .await
    }
}
