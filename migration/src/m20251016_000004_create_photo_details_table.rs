use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhotoDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PhotoDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PhotoDetails::PhotoId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PhotoDetails::Title).text().not_null())
                    .col(
                        ColumnDef::new(PhotoDetails::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_details_photo_id")
                            .from(PhotoDetails::Table, PhotoDetails::PhotoId)
                            .to(Photos::Table, Photos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhotoDetails::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PhotoDetails {
    Table,
    Id,
    PhotoId,
    Title,
    Description,
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    Id,
}
