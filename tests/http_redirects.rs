use axum::body::Body;
use axum::http::{Request, StatusCode, header::LOCATION};
use mokkan_sites::application::commands::redirects::CreateRedirectCommand;
use tower::util::ServiceExt as _;

mod support;

use support::{TestApp, admin_user, assert_error_response, body_json, published_article, rename_article};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;

    let resp = app.router().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn moved_content_answers_with_its_redirect() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;

    let created = app
        .services
        .content_commands
        .create(&ctx, published_article("Hello World").build())
        .await
        .unwrap();
    app.services
        .content_commands
        .update(
            &ctx,
            rename_article(created.id, created.version, "Hello World", "hello-rust"),
        )
        .await
        .unwrap();

    let resp = app
        .router()
        .oneshot(get("/sites/acme/articles/hello-world"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "/articles/hello-rust"
    );
}

#[tokio::test]
async fn home_and_status_codes_come_from_the_stored_redirect() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;

    app.services
        .redirect_commands
        .create_manual(
            &ctx,
            CreateRedirectCommand {
                from_path: "/".into(),
                to_path: "/campaign".into(),
                status_code: Some(302),
            },
        )
        .await
        .unwrap();

    let resp = app.router().oneshot(get("/sites/acme")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/campaign");
}

#[tokio::test]
async fn unknown_paths_and_tenants_are_not_found() {
    let app = TestApp::new().await;
    app.tenant("acme", "en").await;

    let resp = app
        .router()
        .oneshot(get("/sites/acme/articles/never-existed"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = app
        .router()
        .oneshot(get("/sites/nobody/articles/x"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn inactive_tenants_do_not_redirect() {
    let app = TestApp::new().await;
    let ctx = app.tenant("acme", "en").await;

    app.services
        .redirect_commands
        .create_manual(
            &ctx,
            CreateRedirectCommand {
                from_path: "/old".into(),
                to_path: "/new".into(),
                status_code: None,
            },
        )
        .await
        .unwrap();
    app.services
        .tenant_commands
        .deactivate(Some(admin_user()), i64::from(ctx.tenant_id))
        .await
        .unwrap();

    let resp = app.router().oneshot(get("/sites/acme/old")).await.unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}
