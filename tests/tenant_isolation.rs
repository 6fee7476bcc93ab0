use mokkan_sites::application::{
    commands::content::{DeleteContentCommand, UpdateContentCommand},
    error::ErrorKind,
    queries::{
        audit::ListAuditEntriesQuery,
        content::{GetContentQuery, GetPublicContentBySlugQuery, ListContentQuery},
    },
};
use mokkan_sites::domain::content::ContentKind;
use proptest::prelude::*;

mod support;

use support::{TestApp, admin_user, assert_kind, draft_article, published_article};

fn get(id: i64) -> GetContentQuery {
    GetContentQuery {
        kind: ContentKind::Article,
        id,
        locale: None,
        include_deleted: true,
    }
}

#[tokio::test]
async fn other_tenants_cannot_read_or_write_foreign_content() {
    let app = TestApp::new().await;
    let acme = app.tenant("acme", "en").await;
    let globex = app.tenant("globex", "en").await;
    let commands = &app.services.content_commands;

    let created = commands
        .create(&acme, draft_article("Secret Plans").build())
        .await
        .unwrap();

    let err = app
        .services
        .content_queries
        .get_admin(&globex, get(created.id))
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::NotFound);

    let err = commands
        .update(
            &globex,
            UpdateContentCommand::new(ContentKind::Article, created.id, created.version),
        )
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::NotFound);

    let err = commands
        .soft_delete(
            &globex,
            DeleteContentCommand {
                kind: ContentKind::Article,
                id: created.id,
                expected_version: created.version,
            },
        )
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::NotFound);

    let untouched = app
        .services
        .content_queries
        .get_admin(&acme, get(created.id))
        .await
        .unwrap();
    assert_eq!(untouched.content.version, 1);
    assert!(untouched.content.deleted_at.is_none());
}

#[tokio::test]
async fn slugs_may_repeat_across_tenants() {
    let app = TestApp::new().await;
    let acme = app.tenant("acme", "en").await;
    let globex = app.tenant("globex", "en").await;

    for ctx in [&acme, &globex] {
        let created = app
            .services
            .content_commands
            .create(ctx, published_article("About Us").build())
            .await
            .unwrap();
        assert_eq!(created.slug, "about-us");
    }

    let page = app
        .services
        .content_queries
        .get_public_by_slug(
            &globex,
            GetPublicContentBySlugQuery {
                kind: ContentKind::Article,
                locale: None,
                slug: "about-us".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(page.title, "About Us");
}

#[tokio::test]
async fn audit_history_is_tenant_scoped() {
    let app = TestApp::new().await;
    let acme = app.tenant("acme", "en").await;
    let globex = app.tenant("globex", "en").await;

    let created = app
        .services
        .content_commands
        .create(&acme, draft_article("Roadmap").build())
        .await
        .unwrap();

    let foreign = app
        .services
        .audit_queries
        .list(&globex, ListAuditEntriesQuery::for_entity(ContentKind::Article, created.id))
        .await
        .unwrap();
    assert!(foreign.items.is_empty());

    let own = app
        .services
        .audit_queries
        .list(&acme, ListAuditEntriesQuery::for_entity(ContentKind::Article, created.id))
        .await
        .unwrap();
    assert_eq!(own.items.len(), 1);
}

#[tokio::test]
async fn inactive_tenants_are_hidden_but_keep_history() {
    let app = TestApp::new().await;
    let acme = app.tenant("acme", "en").await;

    app.services
        .content_commands
        .create(&acme, draft_article("Welcome").build())
        .await
        .unwrap();
    app.services
        .tenant_commands
        .deactivate(Some(admin_user()), i64::from(acme.tenant_id))
        .await
        .unwrap();

    let err = app
        .services
        .content_queries
        .list_admin(&acme, ListContentQuery::new(ContentKind::Article))
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::NotFound);

    let err = app
        .services
        .content_commands
        .create(&acme, draft_article("Too Late").build())
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::NotFound);

    let err = app
        .services
        .tenant_queries
        .get_by_slug("acme")
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::NotFound);

    let history = app
        .services
        .audit_queries
        .list(&acme, ListAuditEntriesQuery::default())
        .await
        .unwrap();
    assert!(!history.items.is_empty());

    let listed = app.services.tenant_queries.list(true).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].active);
    assert!(app.services.tenant_queries.list(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_tenant_slug_is_a_conflict() {
    let app = TestApp::new().await;
    app.tenant("acme", "en").await;

    let err = app
        .services
        .tenant_commands
        .create(
            Some(admin_user()),
            mokkan_sites::application::commands::tenants::CreateTenantCommand {
                slug: "acme".into(),
                name: "Acme again".into(),
                default_locale: "de".into(),
            },
        )
        .await
        .unwrap_err();
    assert_kind(&err, ErrorKind::Conflict);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn listings_never_leak_across_tenants(titles in prop::collection::vec("[a-z]{3,10}", 1..6)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let app = TestApp::new().await;
            let acme = app.tenant("acme", "en").await;
            let globex = app.tenant("globex", "en").await;

            let mut created = 0usize;
            for (index, title) in titles.iter().enumerate() {
                let command = published_article(&format!("{title} {index}")).build();
                if app.services.content_commands.create(&acme, command).await.is_ok() {
                    created += 1;
                }
            }

            let own = app
                .services
                .content_queries
                .list_admin(&acme, ListContentQuery::new(ContentKind::Article))
                .await
                .unwrap();
            let foreign = app
                .services
                .content_queries
                .list_admin(&globex, ListContentQuery::new(ContentKind::Article))
                .await
                .unwrap();

            assert_eq!(own.items.len(), created);
            assert!(foreign.items.is_empty());
        });
    }
}
