use chrono::Duration;
use mokkan_sites::application::{
    RequestContext,
    commands::content::{DeleteContentCommand, PurgeContentCommand},
    queries::audit::ListAuditEntriesQuery,
    services::RetentionReport,
};
use mokkan_sites::domain::content::ContentKind;

mod support;

use support::{TestApp, draft_article};

async fn history_len(app: &TestApp, ctx: &RequestContext, id: i64) -> usize {
    app.services
        .audit_queries
        .list(ctx, ListAuditEntriesQuery::for_entity(ContentKind::Article, id))
        .await
        .unwrap()
        .items
        .len()
}

async fn create_and_purge(app: &TestApp, ctx: &RequestContext, title: &str) -> i64 {
    let commands = &app.services.content_commands;
    let created = commands
        .create(ctx, draft_article(title).build())
        .await
        .unwrap();
    commands
        .soft_delete(
            ctx,
            DeleteContentCommand {
                kind: ContentKind::Article,
                id: created.id,
                expected_version: created.version,
            },
        )
        .await
        .unwrap();
    commands
        .purge(
            ctx,
            PurgeContentCommand {
                kind: ContentKind::Article,
                id: created.id,
            },
        )
        .await
        .unwrap();
    created.id
}

#[tokio::test]
async fn sweep_is_a_no_op_without_a_retention_window() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;
    let purged = create_and_purge(&app, &ctx, "Old Offer").await;

    app.clock.advance(Duration::days(400));
    assert!(!app.services.retention.is_enabled());
    let report = app.services.retention.sweep().await.unwrap();
    assert_eq!(report, RetentionReport::default());
    assert_eq!(history_len(&app, &ctx, purged).await, 3);
}

#[tokio::test]
async fn sweep_removes_only_old_history_of_purged_content() {
    let app = TestApp::with_retention(Some(Duration::days(30))).await;
    let ctx = app.tenant("acme", "en").await;

    let kept = app
        .services
        .content_commands
        .create(&ctx, draft_article("Still Live").build())
        .await
        .unwrap();
    let old = create_and_purge(&app, &ctx, "Old Offer").await;

    app.clock.advance(Duration::days(31));
    let recent = create_and_purge(&app, &ctx, "Recent Offer").await;

    let report = app.services.retention.sweep().await.unwrap();
    assert_eq!(report.tenants_swept, 1);
    assert_eq!(report.entries_removed, 3);

    assert_eq!(history_len(&app, &ctx, old).await, 0);
    assert_eq!(history_len(&app, &ctx, recent).await, 3);
    assert_eq!(history_len(&app, &ctx, kept.id).await, 1);

    let sweeps = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                entity_type: Some("audit_log".into()),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(sweeps.items.len(), 1);
    assert_eq!(sweeps.items[0].action, "purge");
    assert_eq!(sweeps.items[0].after.as_ref().unwrap()["removed"], 3);

    // Tenant and locale history is not content history and stays.
    let setup = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                entity_type: Some("tenant".into()),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(setup.items.len(), 1);

    let again = app.services.retention.sweep().await.unwrap();
    assert_eq!(again.entries_removed, 0);
    let sweeps = app
        .services
        .audit_queries
        .list(
            &ctx,
            ListAuditEntriesQuery {
                entity_type: Some("audit_log".into()),
                ..ListAuditEntriesQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(sweeps.items.len(), 1, "empty sweeps leave no entry");
}
