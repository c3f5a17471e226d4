use tokio_test::{assert_err, assert_ok};

use wroxbot_common::models::{DEFAULT_COLORS, HexColor, SettingField};
use wroxbot_core::{
    db::Database,
    services::config_store::ConfigStore,
    Error,
};
use wroxbot_core::test_utils::helpers::setup_test_store;

#[tokio::test]
async fn test_seed_is_idempotent_across_restarts() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Wrox DB").join("bot_config.db");
    let path = path.to_string_lossy().to_string();

    let db = Database::new(&path).await?;
    let store = ConfigStore::open(&db).await?;
    assert_eq!(store.color_map().await.len(), DEFAULT_COLORS.len());
    db.pool().close().await;

    let db = Database::new(&path).await?;
    let store = ConfigStore::open(&db).await?;
    for _ in 0..3 {
        assert_eq!(store.seed_defaults().await?, 0);
    }
    let (_, colors) = store.load_all().await?;
    assert_eq!(colors.len(), DEFAULT_COLORS.len());
    for (name, hex) in DEFAULT_COLORS {
        assert_eq!(colors.get(name), Some(hex));
    }
    Ok(())
}

#[tokio::test]
async fn test_color_names_are_unique_ignoring_case() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let before = store.color_map().await;

    let result = store.add_color("red", &HexColor::parse("#123456")?).await;
    assert!(matches!(result, Err(Error::AlreadyExists(_))), "{result:?}");
    assert_eq!(store.color_map().await, before);
    assert_eq!(store.lookup_color("RED").await.as_deref(), Some("#FF0000"));
    Ok(())
}

#[tokio::test]
async fn test_added_color_is_visible_by_any_case() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;

    assert_ok!(store.add_color("SkyBlue", &HexColor::parse("#87ceeb")?).await);
    assert_eq!(store.lookup_color("skyblue").await.as_deref(), Some("#87ceeb"));
    assert_eq!(store.lookup_color("SKYBLUE").await.as_deref(), Some("#87ceeb"));

    assert_err!(store.add_color("skyBLUE", &HexColor::parse("#000000")?).await);

    let (_, reloaded) = store.load_all().await?;
    assert_eq!(reloaded.get("SkyBlue"), Some("#87ceeb"));
    Ok(())
}

#[tokio::test]
async fn test_updating_one_setting_keeps_the_other() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    assert_eq!(store.settings().await.banner_url, None);

    store.upsert_setting(SettingField::Banner, "https://img.example/banner.png").await?;
    let after = store.upsert_setting(SettingField::Icon, "https://img.example/icon.png").await?;

    assert_eq!(after.banner_url.as_deref(), Some("https://img.example/banner.png"));
    assert_eq!(after.icon_url.as_deref(), Some("https://img.example/icon.png"));

    let (stored, _) = store.load_all().await?;
    assert_eq!(stored, after);
    Ok(())
}

#[tokio::test]
async fn test_settings_survive_restart() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.db").to_string_lossy().to_string();

    {
        let db = Database::new(&path).await?;
        let store = ConfigStore::open(&db).await?;
        store.upsert_setting(SettingField::Banner, "https://img.example/b1.png").await?;
        store.upsert_setting(SettingField::Banner, "https://img.example/b2.png").await?;
        store.add_color("Lavender", &HexColor::parse("#E6E6FA")?).await?;
        db.pool().close().await;
    }

    let db = Database::new(&path).await?;
    let store = ConfigStore::open(&db).await?;
    let settings = store.settings().await;
    assert_eq!(settings.banner_url.as_deref(), Some("https://img.example/b2.png"));
    assert_eq!(settings.icon_url, None);
    assert_eq!(store.lookup_color("lavender").await.as_deref(), Some("#E6E6FA"));
    assert_eq!(store.color_map().await.len(), DEFAULT_COLORS.len() + 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_write_leaves_snapshot_untouched() -> Result<(), Error> {
    let (db, store) = setup_test_store().await?;
    store.upsert_setting(SettingField::Icon, "https://img.example/old.png").await?;
    db.pool().close().await;

    let result = store.upsert_setting(SettingField::Icon, "https://img.example/new.png").await;
    assert!(matches!(result, Err(Error::Database(_))), "{result:?}");
    assert_eq!(
        store.settings().await.icon_url.as_deref(),
        Some("https://img.example/old.png")
    );
    Ok(())
}
