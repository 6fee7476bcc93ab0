use assert_matches::assert_matches;
use mokkan_sites::application::{
    RequestContext,
    dto::RedirectTarget,
    error::{ApplicationError, ErrorKind},
    queries::{audit::ListAuditEntriesQuery, content::GetContentQuery},
};
use mokkan_sites::domain::{
    audit::AuditAction, content::ContentKind, errors::DomainError, locale::LocaleRemovalMode,
};

mod support;

use support::{TestApp, article_text, assert_kind, draft_article, published_article};

async fn locale_codes(app: &TestApp, ctx: &RequestContext) -> Vec<String> {
    app.services
        .tenant_queries
        .locales(ctx)
        .await
        .unwrap()
        .into_iter()
        .map(|locale| locale.code)
        .collect()
}

async fn redirect_of(app: &TestApp, ctx: &RequestContext, path: &str) -> Option<String> {
    app.services
        .redirect_lookup()
        .resolve(ctx.tenant_id, path)
        .await
        .unwrap()
        .map(|RedirectTarget { location, .. }| location)
}

async fn bilingual_article(app: &TestApp, ctx: &RequestContext) -> i64 {
    app.services
        .content_commands
        .create(
            ctx,
            published_article("Hello World")
                .translation(article_text("de", "Hallo Welt"))
                .build(),
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn locales_are_added_once_and_listed_default_first() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;
    let locales = &app.services.locale_commands;

    let added = locales.add(&ctx, "DE").await.unwrap();
    assert_eq!(added.code, "de");
    assert!(!added.is_default);
    locales.add(&ctx, "at").await.unwrap();

    let err = locales.add(&ctx, "de").await.unwrap_err();
    assert_matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict { ref entity_type, .. }) if entity_type == "locale"
    );
    let err = locales.add(&ctx, "english").await.unwrap_err();
    assert_kind(&err, ErrorKind::Validation);

    assert_eq!(locale_codes(&app, &ctx).await, vec!["en", "at", "de"]);
}

#[tokio::test]
async fn default_switch_requires_full_coverage_of_published_content() {
    let app = TestApp::new().await;
    let ctx = app.tenant_with_locales("acme", &["de"]).await;

    app.services
        .content_commands
        .create(&ctx, published_article("English Only").build())
        .await
        .unwrap();

    let err = app
        .services
        .locale_commands
        .set_default(&ctx, "de")
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Conflict);
    assert_eq!(locale_codes(&app, &ctx).await[0], "en");

    let err = app
        .services
        .locale_commands
        .set_default(&ctx, "fr")
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Validation);

    let unchanged = app
        .services
        .locale_commands
        .set_default(&ctx, "en")
        .await
        .unwrap();
    assert!(unchanged.is_default);
}

#[tokio::test]
async fn switching_the_default_moves_paths_and_redirects() {
    let app = TestApp::new().await;
    let ctx = app.tenant_with_locales("acme", &["de"]).await;
    let id = bilingual_article(&app, &ctx).await;

    // Drafts do not block the switch.
    app.services
        .content_commands
        .create(&ctx, draft_article("English Draft").build())
        .await
        .unwrap();

    let promoted = app
        .services
        .locale_commands
        .set_default(&ctx, "de")
        .await
        .unwrap();
    assert_eq!(promoted.code, "de");
    assert!(promoted.is_default);
    assert_eq!(locale_codes(&app, &ctx).await, vec!["de", "en"]);

    let stored = app
        .services
        .content_queries
        .get_admin(
            &ctx,
            GetContentQuery {
                kind: ContentKind::Article,
                id,
                locale: None,
                include_deleted: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(stored.content.paths["de"], "/articles/hallo-welt");
    assert_eq!(stored.content.paths["en"], "/en/articles/hello-world");

    assert_eq!(
        redirect_of(&app, &ctx, "/articles/hello-world").await.as_deref(),
        Some("/en/articles/hello-world")
    );
    assert_eq!(
        redirect_of(&app, &ctx, "/de/articles/hallo-welt").await.as_deref(),
        Some("/articles/hallo-welt")
    );
    assert_eq!(redirect_of(&app, &ctx, "/articles/hallo-welt").await, None);
}

#[tokio::test]
async fn switching_the_default_audits_both_locales() {
    let app = TestApp::new().await;
    let ctx = app.tenant_with_locales("acme", &["de"]).await;

    app.services
        .locale_commands
        .set_default(&ctx, "de")
        .await
        .unwrap();

    let updates = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                entity_type: Some("locale".into()),
                action: Some(AuditAction::Update),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updates.items.len(), 2);

    let flag_change = |code: &str| {
        let entry = updates
            .items
            .iter()
            .find(|entry| entry.after.as_ref().unwrap()["code"] == code)
            .unwrap_or_else(|| panic!("no audit entry for {code}"));
        assert_eq!(entry.changed_fields, vec!["is_default".to_string()]);
        (
            entry.before.as_ref().unwrap()["is_default"].clone(),
            entry.after.as_ref().unwrap()["is_default"].clone(),
        )
    };
    assert_eq!(flag_change("en"), (true.into(), false.into()));
    assert_eq!(flag_change("de"), (false.into(), true.into()));
}

#[tokio::test]
async fn the_default_locale_cannot_be_removed() {
    let app = TestApp::new().await;
    let ctx = app.tenant_with_locales("acme", &["de"]).await;

    let err = app
        .services
        .locale_commands
        .remove(&ctx, "en", LocaleRemovalMode::MigrateToDefault)
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Validation);

    let err = app
        .services
        .locale_commands
        .remove(&ctx, "fr", LocaleRemovalMode::Reject)
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Validation);
}

#[tokio::test]
async fn reject_mode_refuses_while_published_content_uses_the_locale() {
    let app = TestApp::new().await;
    let ctx = app.tenant_with_locales("acme", &["de"]).await;
    bilingual_article(&app, &ctx).await;

    let err = app
        .services
        .locale_commands
        .remove(&ctx, "de", LocaleRemovalMode::Reject)
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Conflict);
    assert_eq!(locale_codes(&app, &ctx).await, vec!["en", "de"]);
}

#[tokio::test]
async fn reject_mode_drops_draft_translations() {
    let app = TestApp::new().await;
    let ctx = app.tenant_with_locales("acme", &["de"]).await;

    let draft = app
        .services
        .content_commands
        .create(
            &ctx,
            draft_article("Draft").translation(article_text("de", "Entwurf")).build(),
        )
        .await
        .unwrap();

    app.services
        .locale_commands
        .remove(&ctx, "de", LocaleRemovalMode::Reject)
        .await
        .unwrap();

    let stored = app
        .services
        .content_queries
        .get_admin(
            &ctx,
            GetContentQuery {
                kind: ContentKind::Article,
                id: draft.id,
                locale: None,
                include_deleted: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(stored.content.version, draft.version + 1);
    assert_eq!(stored.content.translations.len(), 1);
    assert_eq!(stored.content.translations[0].locale, "en");
    assert_eq!(locale_codes(&app, &ctx).await, vec!["en"]);
}

#[tokio::test]
async fn migrate_mode_redirects_removed_paths_to_the_default_locale() {
    let app = TestApp::new().await;
    let ctx = app.tenant_with_locales("acme", &["de"]).await;
    let id = bilingual_article(&app, &ctx).await;

    app.services
        .locale_commands
        .remove(&ctx, "de", LocaleRemovalMode::MigrateToDefault)
        .await
        .unwrap();

    assert_eq!(
        redirect_of(&app, &ctx, "/de/articles/hallo-welt").await.as_deref(),
        Some("/articles/hello-world")
    );

    let history = app
        .services
        .audit_queries
        .list(&ctx, ListAuditEntriesQuery::for_entity(ContentKind::Article, id))
        .await
        .unwrap();
    assert_eq!(history.items[0].action, AuditAction::Update.as_str());
    assert!(
        history.items[0]
            .changed_fields
            .iter()
            .any(|field| field == "translations.de")
    );

    let removal = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                entity_type: Some("locale".into()),
                action: Some(AuditAction::Delete),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(removal.items.len(), 1);

    // The code can be enabled again afterwards.
    let again = app.services.locale_commands.add(&ctx, "de").await.unwrap();
    assert!(!again.is_default);
}
