//! Create ban appeals table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BanAppeals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BanAppeals::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BanAppeals::Username).string().not_null())
                    .col(ColumnDef::new(BanAppeals::DiscordTag).string().not_null())
                    .col(ColumnDef::new(BanAppeals::Email).string().not_null())
                    .col(ColumnDef::new(BanAppeals::MinecraftUuid).string().null())
                    .col(
                        ColumnDef::new(BanAppeals::BanReason)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BanAppeals::AppealReason).text().not_null())
                    .col(ColumnDef::new(BanAppeals::AdditionalInfo).text().null())
                    .col(
                        ColumnDef::new(BanAppeals::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(BanAppeals::Response).text().null())
                    .col(ColumnDef::new(BanAppeals::HandledBy).string().null())
                    .col(
                        ColumnDef::new(BanAppeals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BanAppeals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BanAppeals::HandledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(BanAppeals::IpAddress).string().null())
                    .col(ColumnDef::new(BanAppeals::UserAgent).text().not_null())
                    .col(
                        ColumnDef::new(BanAppeals::WebhookSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on status
        manager
            .create_index(
                Index::create()
                    .name("idx_ban_appeals_status")
                    .table(BanAppeals::Table)
                    .col(BanAppeals::Status)
                    .to_owned(),
            )
            .await?;

        // Create index on username
        manager
            .create_index(
                Index::create()
                    .name("idx_ban_appeals_username")
                    .table(BanAppeals::Table)
                    .col(BanAppeals::Username)
                    .to_owned(),
            )
            .await?;

        // Create index on email
        manager
            .create_index(
                Index::create()
                    .name("idx_ban_appeals_email")
                    .table(BanAppeals::Table)
                    .col(BanAppeals::Email)
                    .to_owned(),
            )
            .await?;

        // Create index on created_at for recency queries
        manager
            .create_index(
                Index::create()
                    .name("idx_ban_appeals_created_at")
                    .table(BanAppeals::Table)
                    .col(BanAppeals::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BanAppeals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BanAppeals {
    Table,
    Id,
    Username,
    DiscordTag,
    Email,
    MinecraftUuid,
    BanReason,
    AppealReason,
    AdditionalInfo,
    Status,
    Response,
    HandledBy,
    CreatedAt,
    UpdatedAt,
    HandledAt,
    IpAddress,
    UserAgent,
    WebhookSent,
}
