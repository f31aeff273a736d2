//! API documentation handlers - Swagger UI and OpenAPI document.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// OpenAPI 3.0 document
pub const OPENAPI_YAML: &str = include_str!("../../../../docs/api/openapi.yaml");

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>LibreCharts API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
        .swagger-ui .topbar { display: none; }
        .api-header {
            background: #1f2937;
            color: white;
            padding: 20px 40px;
            display: flex;
            align-items: center;
        }
        .api-header h1 { margin: 0; font-size: 1.5rem; font-weight: 600; }
        .api-header .subtitle { opacity: 0.8; font-size: 0.9rem; margin-top: 4px; }
        .api-header a { margin-left: auto; color: white; opacity: 0.8; font-size: 0.85rem; }
    </style>
</head>
<body>
    <div class="api-header">
        <div>
            <h1>LibreCharts API</h1>
            <div class="subtitle">Aeronautical charts by ICAO code and network traffic coverage</div>
        </div>
        <a href="/openapi.yaml" download>Download OpenAPI document</a>
    </div>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/openapi.yaml",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [SwaggerUIBundle.presets.apis],
                docExpansion: "list",
                tryItOutEnabled: true,
                supportedSubmitMethods: ['get'],
                validatorUrl: null,
            });
        };
    </script>
</body>
</html>"#;

/// GET / - Swagger UI
pub async fn swagger_ui_handler() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// GET /openapi.yaml - OpenAPI document
pub async fn openapi_yaml_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/yaml")],
        OPENAPI_YAML,
    )
        .into_response()
}
