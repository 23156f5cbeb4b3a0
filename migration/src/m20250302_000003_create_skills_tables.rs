use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `skills` table and its columns.
#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
    Name,
    CreatedAt,
}

/// Identifiers for the `lawyer_skills` join table.
#[derive(DeriveIden)]
enum LawyerSkills {
    Table,
    LawyerId,
    SkillId,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Skills::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Skills::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Skills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LawyerSkills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LawyerSkills::LawyerId).uuid().not_null())
                    .col(ColumnDef::new(LawyerSkills::SkillId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(LawyerSkills::LawyerId)
                            .col(LawyerSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lawyer_skills_lawyer_id")
                            .from(LawyerSkills::Table, LawyerSkills::LawyerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lawyer_skills_skill_id")
                            .from(LawyerSkills::Table, LawyerSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LawyerSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await
    }
}
