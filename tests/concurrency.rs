use assert_matches::assert_matches;
use mokkan_sites::application::{
    commands::content::{DeleteContentCommand, UpdateContentCommand},
    error::{ApplicationError, ErrorKind},
    queries::content::GetContentQuery,
};
use mokkan_sites::domain::{content::ContentKind, errors::DomainError};
use std::sync::Arc;

mod support;

use support::{TestApp, article_text, assert_kind, draft_article};

#[tokio::test]
async fn stale_version_is_rejected_with_the_current_version() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;
    let commands = &app.services.content_commands;

    let created = commands
        .create(&ctx, draft_article("Pricing").build())
        .await
        .unwrap();
    commands
        .update(
            &ctx,
            UpdateContentCommand::new(ContentKind::Article, created.id, 1)
                .with_translation(article_text("en", "Pricing 2025")),
        )
        .await
        .unwrap();

    let err = commands
        .update(
            &ctx,
            UpdateContentCommand::new(ContentKind::Article, created.id, 1)
                .with_translation(article_text("en", "Pricing Overwritten")),
        )
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_matches!(
        err,
        ApplicationError::Domain(DomainError::VersionConflict { expected: 1, actual: 2, ref entity_type, .. })
            if entity_type == "article"
    );

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
    assert_eq!(stored.content.version, 2);
    assert_eq!(stored.content.translations[0].title, "Pricing 2025");
}

#[tokio::test]
async fn stale_delete_leaves_the_entity_live() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;
    let commands = &app.services.content_commands;

    let created = commands
        .create(&ctx, draft_article("Team").build())
        .await
        .unwrap();
    commands
        .update(
            &ctx,
            UpdateContentCommand::new(ContentKind::Article, created.id, created.version),
        )
        .await
        .unwrap();

    let err = commands
        .soft_delete(
            &ctx,
            DeleteContentCommand {
                kind: ContentKind::Article,
                id: created.id,
                expected_version: created.version,
            },
        )
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::VersionConflict);

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
    assert!(stored.content.deleted_at.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_on_one_version_yield_one_winner() {
    const WRITERS: usize = 6;

    let app = TestApp::on_disk().await;
    let ctx = app.tenant("acme", "en").await;

    for round in 1..=5 {
        let created = app
            .services
            .content_commands
            .create(&ctx, draft_article(&format!("Contact {round}")).build())
            .await
            .unwrap();

        let mut handles = Vec::with_capacity(WRITERS);
        for writer in 0..WRITERS {
            let services = Arc::clone(&app.services);
            let command = UpdateContentCommand::new(ContentKind::Article, created.id, created.version)
                .with_translation(article_text("en", &format!("Contact {round} by {writer}")));
            handles.push(tokio::spawn(async move {
                services.content_commands.update(&ctx, command).await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(updated) => {
                    winners += 1;
                    assert_eq!(updated.version, 2);
                }
                Err(err) => assert_matches!(
                    err,
                    ApplicationError::Domain(DomainError::VersionConflict { expected: 1, actual: 2, .. }),
                    "round {round}"
                ),
            }
        }
        assert_eq!(winners, 1, "round {round}: exactly one write succeeds");
    }
}

#[tokio::test]
async fn sequential_writers_that_reread_always_succeed() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;
    let commands = &app.services.content_commands;

    let created = commands
        .create(&ctx, draft_article("Changelog").build())
        .await
        .unwrap();

    let mut version = created.version;
    for round in 1..=5 {
        let updated = commands
            .update(
                &ctx,
                UpdateContentCommand::new(ContentKind::Article, created.id, version)
                    .with_translation(article_text("en", &format!("Changelog {round}"))),
            )
            .await
            .unwrap();
        assert_eq!(updated.version, version + 1);
        version = updated.version;
    }
    assert_eq!(version, 6);
}

#[tokio::test]
async fn non_positive_expected_version_is_invalid() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;

    let created = app
        .services
        .content_commands
        .create(&ctx, draft_article("Imprint").build())
        .await
        .unwrap();
    let err = app
        .services
        .content_commands
        .update(
            &ctx,
            UpdateContentCommand::new(ContentKind::Article, created.id, 0),
        )
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Validation);
}
