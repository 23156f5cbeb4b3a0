use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contracts {
    Table,
    ClientId,
    LawyerId,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    RoomId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    CreatorId,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    ContractId,
}

#[derive(DeriveIden)]
enum Otps {
    Table,
    Email,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on contracts.client_id for fetching a client's contracts
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_client_id")
                    .table(Contracts::Table)
                    .col(Contracts::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index on contracts.lawyer_id for fetching a lawyer's contracts
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_lawyer_id")
                    .table(Contracts::Table)
                    .col(Contracts::LawyerId)
                    .to_owned(),
            )
            .await?;

        // Index on (room_id, created_at) for paginated message history
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_room_created")
                    .table(Messages::Table)
                    .col(Messages::RoomId)
                    .col(Messages::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index on complaints.creator_id for per-user complaint listings
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_creator_id")
                    .table(Complaints::Table)
                    .col(Complaints::CreatorId)
                    .to_owned(),
            )
            .await?;

        // Index on transactions.contract_id for per-contract ledger reads
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_contract_id")
                    .table(Transactions::Table)
                    .col(Transactions::ContractId)
                    .to_owned(),
            )
            .await?;

        // Index on otps.email for newest-code lookups and purges
        manager
            .create_index(
                Index::create()
                    .name("idx_otps_email")
                    .table(Otps::Table)
                    .col(Otps::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_contracts_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_lawyer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_messages_room_created").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_complaints_creator_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_transactions_contract_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_otps_email").to_owned())
            .await?;

        Ok(())
    }
}
