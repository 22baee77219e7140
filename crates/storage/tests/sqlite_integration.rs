use chrono::{DateTime, Duration, Utc};
use storage::repository::{PreferenceRepository, Storage};
use storage::sqlite::SqliteRepository;

fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

#[tokio::test]
async fn sqlite_roundtrips_preferences() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_prefs_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.get_preference("theme").await.unwrap().is_none());

    repo.set_preference("theme", "dark", fixed_now())
        .await
        .unwrap();
    let record = repo.get_preference("theme").await.unwrap().unwrap();
    assert_eq!(record.key, "theme");
    assert_eq!(record.value, "dark");
    assert_eq!(record.updated_at, fixed_now());

    let later = fixed_now() + Duration::hours(1);
    repo.set_preference("theme", "light", later).await.unwrap();
    let record = repo.get_preference("theme").await.unwrap().unwrap();
    assert_eq!(record.value, "light");
    assert_eq!(record.updated_at, later);

    repo.clear_preference("theme").await.unwrap();
    assert!(repo.get_preference("theme").await.unwrap().is_none());
    // Clearing an absent key is not an error.
    repo.clear_preference("theme").await.unwrap();
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_prefs_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn storage_facade_uses_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_prefs_facade?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .preferences
        .set_preference("theme", "dark", fixed_now())
        .await
        .unwrap();
    let record = storage.preferences.get_preference("theme").await.unwrap();
    assert_eq!(record.map(|r| r.value).as_deref(), Some("dark"));
}
