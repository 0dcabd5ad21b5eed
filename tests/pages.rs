use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

mod common;

async fn get_page(app: &Router, uri: &str) -> (StatusCode, String, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn home_page_renders_from_the_template_tree() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool);

    let (status, content_type, body) = get_page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"), "{content_type}");
    assert!(body.contains("<title>Home | pagesmith</title>"), "{body}");
    assert!(body.contains("<h1>"), "{body}");
    assert!(body.contains("Features"), "{body}");
}

#[tokio::test]
async fn nested_and_hyphenated_pages_resolve() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool);

    let (status, _, body) = get_page(&app, "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>About | pagesmith</title>"), "{body}");

    // blog/index.html claims the directory root
    let (status, _, _) = get_page(&app, "/blog").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = get_page(&app, "/blog/post").await;
    assert_eq!(status, StatusCode::OK);

    // contact-us.html gets a Title Case title
    let (status, _, body) = get_page(&app, "/contact-us").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Contact Us | pagesmith</title>"), "{body}");
}

#[tokio::test]
async fn partials_are_not_routed() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool);

    let (status, _, _) = get_page(&app, "/_layout").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_page_renders_the_html_not_found_page() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool);

    let (status, content_type, body) = get_page(&app, "/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.starts_with("text/html"), "{content_type}");
    assert!(body.contains("Page Not Found"), "{body}");
    assert!(body.contains("404"), "{body}");
}

#[tokio::test]
async fn unknown_api_route_stays_json() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool);

    let (status, content_type, body) = get_page(&app, "/api/v1/no-such-endpoint").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.starts_with("application/json"), "{content_type}");
    assert!(body.contains("\"statusCode\":404"), "{body}");
}

#[tokio::test]
async fn static_assets_are_served() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool);

    let (status, content_type, body) = get_page(&app, "/static/css/site.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/css"), "{content_type}");
    assert!(body.contains(".site-header"), "{body}");
}
