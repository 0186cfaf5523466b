use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhotoTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PhotoTags::PhotoId).integer().not_null())
                    .col(ColumnDef::new(PhotoTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(PhotoTags::PhotoId)
                            .col(PhotoTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_tags_photo_id")
                            .from(PhotoTags::Table, PhotoTags::PhotoId)
                            .to(Photos::Table, Photos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photo_tags_tag_id")
                            .from(PhotoTags::Table, PhotoTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhotoTags::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PhotoTags {
    Table,
    PhotoId,
    TagId,
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
}
