//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for OpenAPI documentation generation.

use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        crate::routes::health,
        // Charettes
        crate::routes::charettes::list_charettes,
        crate::routes::charettes::create_charette,
        crate::routes::charettes::get_charette,
        crate::routes::charettes::update_charette,
        // Messages
        crate::routes::messages::get_messages,
        crate::routes::messages::add_message,
        // Participants
        crate::routes::participants::get_participants,
        crate::routes::participants::add_participant,
        // Analysis
        crate::routes::analysis::get_analysis,
        crate::routes::analysis::store_analysis,
        // Reports
        crate::routes::reports::get_reports,
        crate::routes::reports::get_latest_report,
        crate::routes::reports::store_report,
        // OpenAPI
        crate::routes::openapi::serve_openapi_json,
    ),
    components(schemas(
        crate::routes::HealthResponse,
        crate::services::StoreMode,
    )),
    modifiers(&VersionAddon),
    tags(
        (name = "Health", description = "Liveness and store mode"),
        (name = "Charettes", description = "Charette documents"),
        (name = "Messages", description = "Discussion messages, optionally per breakout room"),
        (name = "Participants", description = "Charette participants"),
        (name = "Analysis", description = "Analysis results"),
        (name = "Reports", description = "Generated reports"),
        (name = "OpenAPI", description = "OpenAPI specification"),
    ),
    info(
        title = "Charette Store API",
        description = "REST API over the charette persistence layer",
    ),
    servers(
        (url = "http://localhost:8081/api/v1", description = "Local development server")
    )
)]
pub struct ApiDoc;

struct VersionAddon;

impl Modify for VersionAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Keep the document version in step with Cargo.toml
        openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    }
}
