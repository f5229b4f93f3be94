//! `OpenAPI` (3.0) document generated from the handler annotations.

use contracts::domain::a001_stage::aggregate::{Stage, StageDto, StagePatch};
use contracts::shared::api::MessageResponse;
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stage Manager API",
        version = "1.0.0",
        description = "API to manage stages (Date, Place, Name, Cost, Dept)"
    ),
    paths(
        crate::handlers::a001_stage::create,
        crate::handlers::a001_stage::list_all,
        crate::handlers::a001_stage::get_by_id,
        crate::handlers::a001_stage::update,
        crate::handlers::a001_stage::delete,
        crate::handlers::a001_stage::seed,
        crate::handlers::api_docs::openapi_json,
    ),
    components(schemas(Stage, StageDto, StagePatch, MessageResponse)),
    tags(
        (name = "Stages", description = "The stage managing API"),
        (name = "Docs", description = "API documentation"),
    )
)]
pub struct StageApiDoc;

/// Returns the generated doc, advertising a local server on `port`.
pub fn openapi(port: u16) -> utoipa::openapi::OpenApi {
    let mut doc = StageApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!("http://localhost:{port}"))]);
    doc
}

/// Returns the generated doc serialized as pretty JSON.
pub fn openapi_json(port: u16) -> Result<String, serde_json::Error> {
    openapi(port).to_pretty_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_openapi_generation() {
        let doc = openapi(3000);
        assert_eq!(doc.info.title, "Stage Manager API");
        assert_eq!(doc.info.version, "1.0.0");
        assert!(doc.paths.paths.contains_key("/api/stages"));
        assert!(doc.paths.paths.contains_key("/api/stages/{id}"));
        assert!(doc.paths.paths.contains_key("/api/stages/seed"));
    }

    #[test]
    fn test_openapi_server_uses_port() {
        let doc: Value = serde_json::from_str(&openapi_json(8080).unwrap()).unwrap();
        assert_eq!(doc["servers"][0]["url"], "http://localhost:8080");
    }

    #[test]
    fn test_stage_schema_uses_wire_names() {
        let doc: Value = serde_json::from_str(&openapi_json(3000).unwrap()).unwrap();
        let properties = doc["components"]["schemas"]["Stage"]["properties"]
            .as_object()
            .expect("Stage properties");
        for name in ["id", "date", "place", "stageName", "cost", "dept"] {
            assert!(properties.contains_key(name), "missing property {name}");
        }

        let post = &doc["paths"]["/api/stages"]["post"];
        assert_eq!(
            post["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/StageDto"
        );
        assert!(post["responses"].get("201").is_some());
    }
}
