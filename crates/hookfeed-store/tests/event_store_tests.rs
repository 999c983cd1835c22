use chrono::{Duration, TimeZone, Utc};
use entity::sea_orm_active_enums::EventAction;
use hookfeed_store::{Event, EventStore, Store};
use migration::MigratorTrait;
use sea_orm::{Database, DbErr};
use tokio::sync::Mutex;

// Tests run in parallel; only one of them may apply migrations.
static MIGRATED: Mutex<bool> = Mutex::const_new(false);

// Skipped unless DATABASE_URL points at a Postgres instance.
async fn setup_test_db() -> Result<Option<Store>, DbErr> {
    let Ok(db_url) = std::env::var("DATABASE_URL") else {
        return Ok(None);
    };

    let db = Database::connect(&db_url).await?;

    let mut migrated = MIGRATED.lock().await;
    if !*migrated {
        migration::Migrator::up(&db, None).await?;
        *migrated = true;
    }

    Ok(Some(Store::new(db)))
}

fn test_event(request_id: &str, author: &str, offset_secs: i64) -> Event {
    // Far-future base so rows left by other runs never interleave
    let base = Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();

    Event {
        request_id: request_id.to_string(),
        author: author.to_string(),
        action: EventAction::Push,
        from_branch: "main".to_string(),
        to_branch: "main".to_string(),
        timestamp: base + Duration::seconds(offset_secs),
    }
}

fn with_author<'a>(events: &'a [Event], author: &str) -> Vec<&'a str> {
    events
        .iter()
        .filter(|e| e.author == author)
        .map(|e| e.request_id.as_str())
        .collect()
}

#[tokio::test]
async fn test_append_then_query_round_trips() {
    let Some(store) = setup_test_db().await.expect("Failed to connect") else {
        return;
    };

    let author = format!("round-trip-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let event = test_event("abc123", &author, 1);

    store.append(&event).await.expect("Failed to append event");

    let events = store.query_after(None).await.expect("Failed to query events");
    let stored: Vec<&Event> = events.iter().filter(|e| e.author == author).collect();

    assert_eq!(stored, vec![&event]);
}

#[tokio::test]
async fn test_query_after_excludes_boundary_and_sorts() {
    let Some(store) = setup_test_db().await.expect("Failed to connect") else {
        return;
    };

    let author = format!("boundary-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());

    for (id, offset) in [("late", 30), ("boundary", 10), ("middle", 20)] {
        store
            .append(&test_event(id, &author, offset))
            .await
            .expect("Failed to append event");
    }

    let cursor = test_event("boundary", &author, 10).timestamp;
    let events = store
        .query_after(Some(cursor))
        .await
        .expect("Failed to query events");

    assert_eq!(
        with_author(&events, &author),
        vec!["middle", "late"],
        "Boundary event must not be returned and results must ascend"
    );
}

#[tokio::test]
async fn test_equal_timestamps_keep_insertion_order() {
    let Some(store) = setup_test_db().await.expect("Failed to connect") else {
        return;
    };

    let author = format!("ties-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());

    for id in ["first", "second", "third"] {
        store
            .append(&test_event(id, &author, 40))
            .await
            .expect("Failed to append event");
    }

    let events = store.query_after(None).await.expect("Failed to query events");

    assert_eq!(
        with_author(&events, &author),
        vec!["first", "second", "third"]
    );
}
