//! Initial migration creating the inquiries and inquiry_photos tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .col(
                        ColumnDef::new(Inquiries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inquiries::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Inquiries::Email).string_len(320))
                    .col(ColumnDef::new(Inquiries::Phone).string_len(20))
                    .col(ColumnDef::new(Inquiries::Address).text())
                    .col(ColumnDef::new(Inquiries::ServiceType).string_len(50))
                    .col(ColumnDef::new(Inquiries::Message).text().not_null())
                    .col(ColumnDef::new(Inquiries::UtmParams).json())
                    .col(ColumnDef::new(Inquiries::TrafficSource).text())
                    .col(ColumnDef::new(Inquiries::LandingPage).text())
                    .col(ColumnDef::new(Inquiries::Referrer).text())
                    .col(
                        ColumnDef::new(Inquiries::Status)
                            .string_len(20)
                            .not_null()
                            .default("new"),
                    )
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Inquiries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Admin listing is newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_created_at")
                    .table(Inquiries::Table)
                    .col(Inquiries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // inquiry_id carries no foreign key: photo rows and inquiry rows are
        // written in separate calls, and a failed upload must not block the rest.
        manager
            .create_table(
                Table::create()
                    .table(InquiryPhotos::Table)
                    .col(
                        ColumnDef::new(InquiryPhotos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InquiryPhotos::InquiryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InquiryPhotos::FileKey)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InquiryPhotos::Url).text().not_null())
                    .col(ColumnDef::new(InquiryPhotos::Filename).string_len(255))
                    .col(ColumnDef::new(InquiryPhotos::MimeType).string_len(100))
                    .col(ColumnDef::new(InquiryPhotos::FileSize).big_integer())
                    .col(
                        ColumnDef::new(InquiryPhotos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiry_photos_inquiry")
                    .table(InquiryPhotos::Table)
                    .col(InquiryPhotos::InquiryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InquiryPhotos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Inquiries {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    ServiceType,
    Message,
    UtmParams,
    TrafficSource,
    LandingPage,
    Referrer,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InquiryPhotos {
    Table,
    Id,
    InquiryId,
    FileKey,
    Url,
    Filename,
    MimeType,
    FileSize,
    CreatedAt,
}
