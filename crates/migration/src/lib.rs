pub use sea_orm_migration::prelude::*;

mod m20261018_090000_create_enums;
mod m20261018_090100_create_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_090000_create_enums::Migration),
            Box::new(m20261018_090100_create_events::Migration),
        ]
    }
}
