//! OpenAPI specification endpoints.
//!
//! Serves the generated OpenAPI document plus a small landing page linking to it.

use axum::{
    Router,
    response::{Html, Json},
    routing::get,
};
use utoipa::OpenApi;

use super::super::openapi::ApiDoc;
use super::app_state::AppState;

/// Create the OpenAPI router
pub fn openapi_router() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(serve_openapi_json))
        .route("/swagger", get(serve_swagger_html))
}

/// GET /openapi.json - Serve the OpenAPI specification as JSON
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "OpenAPI",
    responses(
        (status = 200, description = "OpenAPI specification", body = Object)
    )
)]
pub async fn serve_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /swagger - Landing page pointing at the spec and external viewers
pub async fn serve_swagger_html() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Charette Store API</title>
    <style>
        body { font-family: sans-serif; max-width: 720px; margin: 40px auto; }
        code { background: #f5f5f5; padding: 2px 4px; }
    </style>
</head>
<body>
    <h1>Charette Store API</h1>
    <p>The OpenAPI document is served at <a href="/api/v1/openapi.json"><code>/api/v1/openapi.json</code></a>.</p>
    <p>Load it into <a href="https://editor.swagger.io" target="_blank">Swagger Editor</a> or import the URL into Postman.</p>
</body>
</html>
"#,
    )
}
