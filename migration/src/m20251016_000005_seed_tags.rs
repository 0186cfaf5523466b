use sea_orm_migration::prelude::*;

/// Every tag name the application knows about. Must stay in sync with `TagName`.
pub const TAG_NAMES: &[&str] = &[
    "TAG_UNKNOWN",
    "TAG_PORTRAIT",
    "TAG_LANDSCAPE",
    "TAG_ANIMAL",
    "TAG_ARCHITECTURE",
    "TAG_FOOD",
    "TAG_STREET",
    "TAG_NATURE",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Tags::Table).columns([Tags::Name]);

        for name in TAG_NAMES {
            insert
                .values([(*name).into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Tags::Table)
                    .and_where(Expr::col(Tags::Name).is_in(TAG_NAMES.iter().copied()))
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Name,
}
