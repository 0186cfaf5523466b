mod m20251016_000001_create_photos_table;
mod m20251016_000002_create_tags_table;
mod m20251016_000003_create_photo_tags_table;
mod m20251016_000004_create_photo_details_table;
mod m20251016_000005_seed_tags;

use sea_orm_migration::prelude::*;

pub use m20251016_000005_seed_tags::TAG_NAMES;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251016_000001_create_photos_table::Migration),
            Box::new(m20251016_000002_create_tags_table::Migration),
            Box::new(m20251016_000003_create_photo_tags_table::Migration),
            Box::new(m20251016_000004_create_photo_details_table::Migration),
            Box::new(m20251016_000005_seed_tags::Migration),
        ]
    }
}
