//! Cross-instance synchronization integration tests
//!
//! Several application instances share one store, the way browser tabs
//! share local storage. Writes made by one instance reach the others through
//! change notifications.

use std::time::Duration;

use app_core::{CatalogConfig, RecipeCatalog};
use app_ui::{AppShell, Screen};
use storage::KvStore;

fn shell(kv: KvStore) -> AppShell {
    AppShell::new(kv, RecipeCatalog::builtin(CatalogConfig::instant()))
}

async fn settle<F: Fn() -> bool>(condition: F) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// A favorite added in one instance shows up in another
#[tokio::test]
async fn test_toggle_visible_in_other_instance() {
    let kv_a = KvStore::in_memory();
    let kv_b = kv_a.attach_instance();

    let a = shell(kv_a);
    let b = shell(kv_b);
    a.start().await.unwrap();
    b.start().await.unwrap();

    a.toggle_favorite("5");
    settle(|| b.favorites().is_favorite("5")).await;

    match b.screen() {
        Screen::Home(home) => assert_eq!(home.saved_text(), "Saved recipes: 1"),
        other => panic!("expected home, got {:?}", other),
    }

    // And back again
    b.toggle_favorite("5");
    settle(|| !a.favorites().is_favorite("5")).await;
}

/// Every instance converges on the last write
#[tokio::test]
async fn test_three_instances_converge() {
    let root = KvStore::in_memory();
    let apps: Vec<AppShell> = (0..3).map(|_| shell(root.attach_instance())).collect();
    for app in &apps {
        app.start().await.unwrap();
    }

    apps[0].toggle_favorite("1");
    settle(|| apps.iter().all(|app| app.favorites().is_favorite("1"))).await;

    apps[2].toggle_favorite("7");
    settle(|| apps.iter().all(|app| app.favorites().count() == 2)).await;

    for app in &apps {
        assert_eq!(app.favorites().favorites(), vec!["1".to_string(), "7".to_string()]);
    }
}

/// A local toggle racing a pending notification keeps the mirror on storage
#[tokio::test]
async fn test_local_toggle_before_notification_lands() {
    let kv_a = KvStore::in_memory();
    let kv_b = kv_a.attach_instance();

    let a = shell(kv_a);
    let b = shell(kv_b);
    a.start().await.unwrap();
    b.start().await.unwrap();

    a.toggle_favorite("1");
    b.toggle_favorite("2");
    settle(|| a.favorites().count() == 2).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let expected = vec!["1".to_string(), "2".to_string()];
    assert_eq!(b.favorites().store().get_favorites(), expected);
    assert_eq!(b.favorites().favorites(), expected);
    assert_eq!(a.favorites().favorites(), expected);
}

/// A write landing before the instance starts listening is still picked up
#[tokio::test]
async fn test_write_between_new_and_start() {
    let kv_a = KvStore::in_memory();
    let kv_b = kv_a.attach_instance();

    let a = shell(kv_a);
    let b = shell(kv_b);
    a.toggle_favorite("5");
    b.start().await.unwrap();

    settle(|| b.favorites().is_favorite("5")).await;
}

/// Raw writes from outside the app are picked up, malformed ones reset
#[tokio::test]
async fn test_external_raw_writes() {
    let kv = KvStore::in_memory();
    let app = shell(kv.attach_instance());
    app.start().await.unwrap();

    kv.set_raw("favorites", r#"["3","3","8"]"#).unwrap();
    settle(|| app.favorites().count() == 2).await;
    assert_eq!(app.favorites().favorites(), vec!["3".to_string(), "8".to_string()]);

    kv.set_raw("favorites", "garbage").unwrap();
    settle(|| app.favorites().count() == 0).await;

    kv.set_raw("favorites", r#"["4"]"#).unwrap();
    settle(|| app.favorites().is_favorite("4")).await;
    kv.remove("favorites").unwrap();
    settle(|| app.favorites().count() == 0).await;
}

/// Theme changes are not followed live; a new instance picks them up
#[tokio::test]
async fn test_theme_read_on_start_only() {
    let kv = KvStore::in_memory();
    let mut a = shell(kv.clone());
    let b = shell(kv.attach_instance());

    a.toggle_theme();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(b.theme().data_theme(), "light");

    let c = shell(kv.attach_instance());
    assert_eq!(c.theme().data_theme(), "dark");
}
