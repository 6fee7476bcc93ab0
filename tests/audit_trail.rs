use mokkan_sites::application::{
    RequestContext,
    commands::content::{DeleteContentCommand, UpdateContentCommand},
    error::ErrorKind,
    queries::{
        audit::ListAuditEntriesQuery,
        content::{GetContentQuery, ListContentQuery},
    },
};
use mokkan_sites::domain::{audit::AuditAction, content::ContentKind};

mod support;

use support::{
    ADMIN_USER, TestApp, article_text, assert_kind, draft_article, published_article,
    rename_article,
};

#[tokio::test]
async fn every_write_appends_one_entry_newest_first() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;
    let commands = &app.services.content_commands;

    let created = commands
        .create(&ctx, draft_article("Services Overview").build())
        .await
        .unwrap();
    let updated = commands
        .update(
            &ctx,
            UpdateContentCommand::new(ContentKind::Article, created.id, created.version)
                .with_translation(article_text("en", "Our Services")),
        )
        .await
        .unwrap();
    commands
        .soft_delete(
            &ctx,
            DeleteContentCommand {
                kind: ContentKind::Article,
                id: created.id,
                expected_version: updated.version,
            },
        )
        .await
        .unwrap();

    let history = app
        .services
        .audit_queries
        .list(&ctx, ListAuditEntriesQuery::for_entity(ContentKind::Article, created.id))
        .await
        .unwrap();
    let actions: Vec<_> = history.items.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["delete", "update", "create"]);
    assert!(history.items.iter().all(|e| e.user_id == Some(ADMIN_USER)));
    assert!(history.items.iter().all(|e| e.entity_type == "article"));

    let create = &history.items[2];
    assert!(create.before.is_none());
    assert_eq!(create.after.as_ref().unwrap()["version"], 1);

    let update = &history.items[1];
    assert_eq!(update.before.as_ref().unwrap()["version"], 1);
    assert_eq!(update.after.as_ref().unwrap()["version"], 2);
    for field in ["version", "translations.en.title", "translations.en.slug"] {
        assert!(
            update.changed_fields.iter().any(|changed| changed == field),
            "{field} missing from {:?}",
            update.changed_fields
        );
    }
    assert!(!update.changed_fields.iter().any(|changed| changed == "status"));

    let delete = &history.items[0];
    assert!(delete.after.as_ref().unwrap()["deleted_at"].is_string());
}

#[tokio::test]
async fn tenant_setup_is_recorded() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;

    let history = app
        .services
        .audit_queries
        .list(&ctx, ListAuditEntriesQuery::default())
        .await
        .unwrap();
    let mut types: Vec<_> = history
        .items
        .iter()
        .map(|e| e.entity_type.as_str())
        .collect();
    types.sort_unstable();
    assert_eq!(types, vec!["locale", "tenant"]);
}

#[tokio::test]
async fn failing_audit_append_rolls_back_the_whole_write() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;

    let created = app
        .services
        .content_commands
        .create(&ctx, published_article("Hello World").build())
        .await
        .unwrap();

    sqlx::query(
        "CREATE TRIGGER reject_article_audit BEFORE INSERT ON audit_entries \
         WHEN NEW.entity_type = 'article' \
         BEGIN SELECT RAISE(ABORT, 'audit store unavailable'); END",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let err = app
        .services
        .content_commands
        .update(
            &ctx,
            rename_article(created.id, created.version, "Hello World", "hello-rust"),
        )
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Internal);

    let err = app
        .services
        .content_commands
        .create(&ctx, draft_article("Never Stored").build())
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Internal);

    let stored = app
        .services
        .content_queries
        .get_admin(
            &ctx,
            GetContentQuery {
                kind: ContentKind::Article,
                id: created.id,
                locale: None,
                include_deleted: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(stored.content.version, 1);
    assert_eq!(stored.content.translations[0].slug, "hello-world");

    let redirect = app
        .services
        .redirect_lookup()
        .resolve(ctx.tenant_id, "/articles/hello-world")
        .await
        .unwrap();
    assert!(redirect.is_none(), "redirect write must roll back too");

    let listed = app
        .services
        .content_queries
        .list_admin(&ctx, ListContentQuery::new(ContentKind::Article))
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 1);
}

#[tokio::test]
async fn stored_entries_cannot_be_modified() {
    let app = TestApp::new().await;
    app.tenant("acme", "en").await;

    let result = sqlx::query("UPDATE audit_entries SET action = 'update'")
        .execute(&app.pool)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn filters_combine_and_pages_follow_the_cursor() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;
    let commands = &app.services.content_commands;

    let created = commands
        .create(&ctx, draft_article("Faq Intro").build())
        .await
        .unwrap();
    let mut version = created.version;
    for round in 1..=3 {
        version = commands
            .update(
                &ctx,
                UpdateContentCommand::new(ContentKind::Article, created.id, version)
                    .with_translation(article_text("en", &format!("Faq Intro {round}"))),
            )
            .await
            .unwrap()
            .version;
    }

    let updates = ListAuditEntriesQuery {
        action: Some(AuditAction::Update),
        limit: 2,
        ..ListAuditEntriesQuery::for_entity(ContentKind::Article, created.id)
    };
    let first = app
        .services
        .audit_queries
        .list(&ctx, updates.clone())
        .await
        .unwrap();
    assert_eq!(first.items.len(), 2);
    assert!(first.has_more);
    assert_eq!(first.items[0].after.as_ref().unwrap()["version"], 4);

    let second = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                cursor: first.next_cursor.clone(),
                ..updates
            },
        )
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].after.as_ref().unwrap()["version"], 2);
    assert!(!second.has_more);

    let anonymous = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                user_id: Some(ADMIN_USER + 1),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap();
    assert!(anonymous.items.is_empty());
}

#[tokio::test]
async fn time_window_filters_and_rejects_inverted_ranges() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;

    app.clock.advance(chrono::Duration::hours(1));
    let boundary = app.clock.peek();
    app.services
        .content_commands
        .create(&ctx, draft_article("Later").build())
        .await
        .unwrap();

    let recent = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                occurred_after: Some(boundary),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(recent.items.len(), 1);
    assert_eq!(recent.items[0].entity_type, "article");

    let err = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                occurred_after: Some(boundary),
                occurred_before: Some(boundary - chrono::Duration::minutes(1)),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Validation);
}

#[tokio::test]
async fn anonymous_writers_are_recorded_without_user() {
    let app = TestApp::new().await;
    let admin = app.tenant("acme", "en").await;
    let system = RequestContext::new(admin.tenant_id, None);

    let created = app
        .services
        .content_commands
        .create(&system, draft_article("Imported").build())
        .await
        .unwrap();
    let history = app
        .services
        .audit_queries
        .list(&admin, ListAuditEntriesQuery::for_entity(ContentKind::Article, created.id))
        .await
        .unwrap();
    assert_eq!(history.items.len(), 1);
    assert_eq!(history.items[0].user_id, None);
}
