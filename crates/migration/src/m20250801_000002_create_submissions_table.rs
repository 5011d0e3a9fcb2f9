use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Nullable, so that inline submissions without a team reference
                    // are not subject to the uniqueness check.
                    .col(ColumnDef::new(Submissions::TeamId).big_integer().unique_key())
                    .col(ColumnDef::new(Submissions::TeamName).string())
                    .col(ColumnDef::new(Submissions::TeamEmails).json())
                    .col(ColumnDef::new(Submissions::GithubLink).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::LiveDemoLink)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::TwitterPostLink)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::TeamId)
                            .to(crate::Teams::Table, crate::Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub enum Submissions {
    Table,
    Id,
    TeamId,
    TeamName,
    TeamEmails,
    GithubLink,
    LiveDemoLink,
    TwitterPostLink,
    CreatedAt,
}
