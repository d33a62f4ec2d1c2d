use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn unknown_endpoint_returns_404_json() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/notes").await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body, json!({"error": "unknown endpoint"}));
}

#[tokio::test]
async fn openapi_document_lists_blog_routes_and_bearer_scheme() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    let paths = &res.body["paths"];
    assert!(paths.get("/api/blogs").is_some());
    assert!(paths.get("/api/blogs/{id}").is_some());
    assert!(paths.get("/api/users").is_some());
    assert!(paths.get("/api/login").is_some());
    assert_eq!(
        res.body["components"]["securitySchemes"]["jwt"]["scheme"],
        "bearer"
    );
}
