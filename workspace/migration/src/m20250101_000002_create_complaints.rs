use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(pk_auto(Complaints::Id))
                    .col(integer_null(Complaints::UserId))
                    .col(string_len(Complaints::Name, 200))
                    .col(string_len(Complaints::Department, 100))
                    .col(string_len(Complaints::Category, 50))
                    .col(text(Complaints::Description))
                    .col(string_len(Complaints::Status, 30))
                    .col(string_len_null(Complaints::PhotoPath, 512))
                    .col(text_null(Complaints::ResolutionNotes))
                    .col(date_time(Complaints::CreatedAt))
                    .col(date_time(Complaints::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_user")
                            .from(Complaints::Table, Complaints::UserId)
                            .to(Users::Table, Users::Id)
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

#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    UserId,
    Name,
    Department,
    Category,
    Description,
    Status,
    PhotoPath,
    ResolutionNotes,
    CreatedAt,
    UpdatedAt,
}
