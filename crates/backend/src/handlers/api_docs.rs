use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use contracts::shared::api::MessageResponse;

use crate::openapi;
use crate::shared::error::AppError;
use crate::shared::state::AppState;

const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Stage Manager API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// GET /api-docs/openapi.json
#[utoipa::path(
    get,
    path = "/api-docs/openapi.json",
    tag = "Docs",
    responses(
        (status = 200, description = "OpenAPI document", body = String, content_type = "application/json"),
        (status = 500, description = "Internal error", body = MessageResponse),
    )
)]
pub async fn openapi_json(State(state): State<AppState>) -> Response {
    match openapi::openapi_json(state.port) {
        Ok(doc) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], doc).into_response(),
        Err(err) => {
            AppError::Internal(format!("failed to serialize OpenAPI doc: {err}")).into_response()
        }
    }
}

/// GET /api-docs
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swagger_page_is_complete() {
        assert!(SWAGGER_UI_PAGE.contains(r##"dom_id: "#swagger-ui""##));
        assert!(SWAGGER_UI_PAGE.contains(r#"url: "/api-docs/openapi.json""#));
        assert!(SWAGGER_UI_PAGE.trim_end().ends_with("</html>"));
    }
}
