use hookfeed_config::HookfeedConfig;
use hookfeed_store::{EventStore, MemoryStore, Store};
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;

pub async fn open_store(config: &HookfeedConfig) -> anyhow::Result<Arc<dyn EventStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("No database_url configured, events are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let db = Database::connect(database_url).await?;

    migration::Migrator::up(&db, None).await?;

    tracing::info!("Database migrations complete");

    Ok(Arc::new(Store::new(db)))
}
