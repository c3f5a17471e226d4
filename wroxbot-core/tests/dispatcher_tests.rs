use wroxbot_common::models::{DiscordColor, HexColor, SettingField};
use wroxbot_core::{
    services::command_dispatcher::{CommandContext, DispatchOutcome, RawArgs},
    services::config_store::ConfigStore,
    services::discord::slashcommands::builtin_dispatcher,
    tasks::live_status::LiveOutcome,
    Error,
};
use wroxbot_core::test_utils::helpers::{
    setup_test_store, test_bot_profile, test_invocation, FakeClock, RecordingTransport,
};

async fn run(
    store: &ConfigStore,
    transport: &RecordingTransport,
    name: &str,
    args: &[(&str, &str)],
) -> Result<DispatchOutcome, Error> {
    let clock = FakeClock::default();
    let bot = test_bot_profile();
    let invocation = test_invocation("alice");
    let ctx = CommandContext {
        store,
        transport,
        clock: &clock,
        bot: &bot,
        invocation: &invocation,
    };
    let raw = RawArgs::from_pairs(args.iter().copied());
    builtin_dispatcher().dispatch(name, &raw, &ctx).await
}

fn title_of(transport: &RecordingTransport) -> String {
    transport.only_reply().embeds[0].title.clone().unwrap_or_default()
}

#[tokio::test]
async fn test_announce_uses_palette_and_settings_and_keeps_text_verbatim() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    store.upsert_setting(SettingField::Banner, "https://img.example/banner.png").await?;
    let transport = RecordingTransport::new();

    let outcome = run(
        &store,
        &transport,
        "announce",
        &[("title", " Launch "), ("description", "We are live\n  - soon"), ("color", "gold")],
    )
    .await?;

    assert_eq!(outcome, DispatchOutcome::Replied);
    let reply = transport.only_reply();
    assert!(!reply.is_private());
    let embed = &reply.embeds[0];
    assert_eq!(embed.title.as_deref(), Some(" Launch "));
    assert_eq!(embed.description.as_deref(), Some("We are live\n  - soon"));
    assert_eq!(embed.color, Some(DiscordColor(0xFFD700)));
    assert_eq!(embed.image.as_ref().map(|i| i.url.as_str()), Some("https://img.example/banner.png"));
    assert!(embed.thumbnail.is_none());
    assert_eq!(embed.footer.as_ref().map(|f| f.text.as_str()), Some("Announced by alice"));
    Ok(())
}

#[tokio::test]
async fn test_literal_hex_wins_over_a_color_named_like_it() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    store.add_color("#ABCDEF", &HexColor::parse("#000001")?).await?;
    let transport = RecordingTransport::new();

    run(&store, &transport, "announce", &[("title", "t"), ("description", "d"), ("color", "#ABCDEF")]).await?;

    assert_eq!(transport.only_reply().embeds[0].color, Some(DiscordColor(0xABCDEF)));
    Ok(())
}

#[tokio::test]
async fn test_added_color_resolves_case_insensitively_in_announce() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    store.add_color("SkyBlue", &HexColor::parse("#00AAFF")?).await?;
    let transport = RecordingTransport::new();

    run(&store, &transport, "announce", &[("title", "t"), ("description", "d"), ("color", "skyblue")]).await?;

    assert_eq!(transport.only_reply().embeds[0].color, Some(DiscordColor(0x00AAFF)));
    Ok(())
}

#[tokio::test]
async fn test_announce_without_color_has_no_color() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let transport = RecordingTransport::new();

    run(&store, &transport, "announce", &[("title", "t"), ("description", "d")]).await?;

    assert_eq!(transport.only_reply().embeds[0].color, None);
    Ok(())
}

#[tokio::test]
async fn test_unknown_color_name_is_rejected_privately() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let transport = RecordingTransport::new();

    let outcome = run(&store, &transport, "announce", &[("title", "t"), ("description", "d"), ("color", "chartreuse")]).await?;

    assert_eq!(outcome, DispatchOutcome::Failed);
    assert!(transport.only_reply().is_private());
    assert_eq!(title_of(&transport), "❌ Invalid Color");
    Ok(())
}

#[tokio::test]
async fn test_missing_params_do_not_touch_state() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let colors_before = store.color_map().await;
    let transport = RecordingTransport::new();

    let outcome = run(&store, &transport, "add-color", &[("name", "Mint"), ("hexcolor", "  ")]).await?;

    assert_eq!(outcome, DispatchOutcome::Failed);
    let reply = transport.only_reply();
    assert!(reply.is_private());
    assert_eq!(reply.embeds[0].title.as_deref(), Some("❌ Usage Error"));
    assert!(reply.embeds[0]
        .description
        .as_deref()
        .unwrap_or_default()
        .contains("/add-color <name> <hexcolor>"));
    assert_eq!(store.color_map().await, colors_before);
    Ok(())
}

#[tokio::test]
async fn test_add_color_checks_uniqueness_before_hex() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;

    let transport = RecordingTransport::new();
    run(&store, &transport, "add-color", &[("name", "Red"), ("hexcolor", "zzz")]).await?;
    assert_eq!(title_of(&transport), "❌ Color Exists");

    let transport = RecordingTransport::new();
    run(&store, &transport, "add-color", &[("name", "Mint"), ("hexcolor", "98FF98")]).await?;
    let reply = transport.only_reply();
    assert!(reply.is_private());
    assert_eq!(reply.embeds[0].title.as_deref(), Some("❌ Invalid Hex Code"));
    assert_eq!(
        reply.embeds[0].description.as_deref(),
        Some("Provide a valid hex code (e.g., `#FF5733`).")
    );
    assert_eq!(store.lookup_color("mint").await, None);

    let transport = RecordingTransport::new();
    run(&store, &transport, "add-color", &[("name", "Mint"), ("hexcolor", "#98FF98")]).await?;
    assert_eq!(title_of(&transport), "✅ Color Added");
    assert_eq!(store.lookup_color("mint").await.as_deref(), Some("#98FF98"));
    Ok(())
}

#[tokio::test]
async fn test_list_colors_shows_every_color_privately() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let transport = RecordingTransport::new();

    run(&store, &transport, "list-colors", &[]).await?;

    let reply = transport.only_reply();
    assert!(reply.is_private());
    let fields: usize = reply.embeds.iter().map(|e| e.fields.len()).sum();
    assert_eq!(fields, store.color_map().await.len());
    assert!(reply.embeds[0].fields.iter().any(|f| f.name == "🖌️ Gold" && f.value == "#FFD700"));
    Ok(())
}

#[tokio::test]
async fn test_set_banner_then_icon_modes() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;

    let transport = RecordingTransport::new();
    run(&store, &transport, "set-banner", &[("url", "https://img.example/banner.png")]).await?;
    assert_eq!(title_of(&transport), "✅ Banner Set");

    let transport = RecordingTransport::new().with_avatar("https://cdn.example/bot.png");
    run(&store, &transport, "set-icon", &[("type", "BOT")]).await?;
    assert_eq!(title_of(&transport), "✅ Icon Set");
    assert_eq!(store.settings().await.icon_url.as_deref(), Some("https://cdn.example/bot.png"));

    let transport = RecordingTransport::new();
    run(&store, &transport, "set-icon", &[("type", "custom"), ("value", "https://img.example/i.png")]).await?;
    assert_eq!(title_of(&transport), "✅ Custom Icon Set");

    let settings = store.settings().await;
    assert_eq!(settings.icon_url.as_deref(), Some("https://img.example/i.png"));
    assert_eq!(settings.banner_url.as_deref(), Some("https://img.example/banner.png"));
    Ok(())
}

#[tokio::test]
async fn test_set_icon_rejects_bad_modes() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;

    for args in [&[("type", "custom")][..], &[("type", "emoji"), ("value", "x")][..]] {
        let transport = RecordingTransport::new();
        let outcome = run(&store, &transport, "set-icon", args).await?;
        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(title_of(&transport), "❌ Usage Error");
    }
    assert_eq!(store.settings().await.icon_url, None);
    Ok(())
}

#[tokio::test]
async fn test_help_lists_every_command() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let transport = RecordingTransport::new();

    run(&store, &transport, "help", &[]).await?;

    let reply = transport.only_reply();
    let names: Vec<&str> = reply.embeds[0].fields.iter().map(|f| f.name.as_str()).collect();
    for cmd in ["/help", "/announce", "/add-color", "/list-colors", "/set-banner", "/set-icon", "/bot-info"] {
        assert!(names.contains(&cmd), "missing {cmd} in {names:?}");
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_command_gets_a_private_notice() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let transport = RecordingTransport::new();

    let outcome = run(&store, &transport, "ann", &[]).await?;

    assert_eq!(outcome, DispatchOutcome::Unknown);
    let reply = transport.only_reply();
    assert!(reply.is_private());
    assert_eq!(reply.content.as_deref(), Some("Unrecognized command: ann"));
    Ok(())
}

#[tokio::test]
async fn test_storage_failure_is_reported_generically() -> Result<(), Error> {
    let (db, store) = setup_test_store().await?;
    db.pool().close().await;
    let transport = RecordingTransport::new();

    let outcome = run(&store, &transport, "set-banner", &[("url", "https://img.example/b.png")]).await?;

    assert_eq!(outcome, DispatchOutcome::Failed);
    assert_eq!(title_of(&transport), "❌ Something Went Wrong");
    assert_eq!(store.settings().await.banner_url, None);
    Ok(())
}

#[tokio::test]
async fn test_bot_info_runs_a_live_session() -> Result<(), Error> {
    let (_db, store) = setup_test_store().await?;
    let transport = RecordingTransport::new().with_avatar("https://cdn.example/bot.png");

    let outcome = run(&store, &transport, "bot-info", &[]).await?;

    assert_eq!(outcome, DispatchOutcome::Live(LiveOutcome::Completed { renders: 16 }));
    assert_eq!(transport.sends().len(), 1);
    assert_eq!(transport.edits().len(), 16);
    Ok(())
}
