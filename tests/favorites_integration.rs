//! Favorites and theme persistence integration tests
//!
//! End-to-end checks through the application shell over both the in-memory
//! and the on-disk store.

use app_core::{CatalogConfig, FavoritesStore, RecipeCatalog};
use app_ui::{AppShell, ModalAction, ModalEvent, NavigationTab, Route, Screen, ThemeName};
use storage::{KvConfig, KvStore};
use tempfile::TempDir;

fn shell(kv: KvStore) -> AppShell {
    AppShell::new(kv, RecipeCatalog::builtin(CatalogConfig::instant()))
}

fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Favorites and theme survive a restart on disk
#[tokio::test]
async fn test_favorites_and_theme_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("explorer.db");

    // Phase 1: favorite two recipes and switch to dark
    {
        let kv = KvStore::open(KvConfig::new(path.to_string_lossy())).unwrap();
        let mut app = shell(kv.clone());
        app.start().await.unwrap();

        app.toggle_favorite("1");
        app.toggle_favorite("4");
        app.toggle_theme();
        kv.flush().unwrap();
    }

    // Phase 2: reopen and verify
    {
        let kv = KvStore::open(KvConfig::new(path.to_string_lossy())).unwrap();
        assert_eq!(kv.get_raw("favorites").unwrap().as_deref(), Some(r#"["1","4"]"#));

        let app = shell(kv);
        assert_eq!(app.favorites().favorites(), ids(&["1", "4"]));
        assert_eq!(app.theme().theme_name, ThemeName::Dark);
        assert_eq!(app.theme().data_theme(), "dark");
    }
}

/// First run: no favorites, light theme
#[tokio::test]
async fn test_first_run_defaults() {
    let app = shell(KvStore::in_memory());
    assert!(app.favorites().favorites().is_empty());
    assert_eq!(app.theme().theme_name, ThemeName::Light);
    assert_eq!(app.theme().toggle_label(), "🌙 Dark");
    assert_eq!(app.current_route(), Route::Home);
}

/// Malformed persisted values fall back to defaults
#[tokio::test]
async fn test_malformed_storage_falls_back() {
    let kv = KvStore::in_memory();
    kv.set_raw("favorites", "{oops").unwrap();
    kv.set_raw("theme", "42").unwrap();

    let app = shell(kv);
    assert!(app.favorites().favorites().is_empty());
    assert_eq!(app.theme().theme_name, ThemeName::Light);
}

/// Theme toggled twice is back where it started, in storage too
#[tokio::test]
async fn test_theme_double_toggle() {
    let kv = KvStore::in_memory();
    let mut app = shell(kv.clone());

    app.toggle_theme();
    app.toggle_theme();
    assert_eq!(app.theme().theme_name, ThemeName::Light);
    assert_eq!(kv.get_raw("theme").unwrap().as_deref(), Some(r#""light""#));
}

/// Favoriting from the Home modal shows up on the Favorites screen
#[tokio::test]
async fn test_favorite_from_modal_then_browse_favorites() {
    let mut app = shell(KvStore::in_memory());
    app.start().await.unwrap();

    app.search_for("vegan").unwrap().await.unwrap();
    assert!(app.open_recipe("17"));
    assert_eq!(app.handle_modal_event(ModalEvent::FavoriteButton), ModalAction::ToggleFavorite);
    assert_eq!(app.handle_modal_event(ModalEvent::Backdrop), ModalAction::Close);

    match app.screen() {
        Screen::Home(home) => {
            let falafel = home.grid.cards.iter().find(|c| c.recipe_id == "17").unwrap();
            assert_eq!(falafel.title, "Falafel Wrap ★");
            assert_eq!(home.saved_text(), "Saved recipes: 1");
        }
        other => panic!("expected home, got {:?}", other),
    }

    app.switch_tab(NavigationTab::Favorites);
    match app.screen() {
        Screen::Favorites(favorites) => {
            assert_eq!(favorites.grid.len(), 1);
            assert!(favorites.empty_message.is_none());
        }
        other => panic!("expected favorites, got {:?}", other),
    }

    // Unfavorite from the Favorites screen
    assert!(app.open_recipe("17"));
    app.handle_modal_event(ModalEvent::FavoriteButton);
    match app.screen() {
        Screen::Favorites(favorites) => {
            assert!(favorites.grid.is_empty());
            // The modal stays open over the emptied list
            assert_eq!(favorites.modal.unwrap().favorite_label(), "☆ Favorite");
        }
        other => panic!("expected favorites, got {:?}", other),
    }
}

/// Toggling twice restores the original list
#[tokio::test]
async fn test_toggle_twice_restores() {
    let kv = KvStore::in_memory();
    let store = FavoritesStore::new(kv);
    store.set_favorites(&ids(&["2", "5"]));

    let app = shell(store.kv().clone());
    app.toggle_favorite("9");
    assert_eq!(app.toggle_favorite("9"), ids(&["2", "5"]));
    assert_eq!(store.get_favorites(), ids(&["2", "5"]));
}

/// Unknown initial paths land on Home
#[tokio::test]
async fn test_initial_unknown_path() {
    let mut app = shell(KvStore::in_memory());
    assert_eq!(app.navigate("/recipe/1/edit"), Route::Home);
    assert_eq!(app.navigation().depth(), 1);
    assert_eq!(app.navigate("/profile"), Route::Profile);
}
