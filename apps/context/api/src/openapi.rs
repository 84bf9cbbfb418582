use domain_chat::ChatApiDoc;
use domain_vector::UserContextApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "User Context API",
        version = "0.1.0",
        description = "Stores user contexts as embeddings, recommends similar profiles and relays chat completions"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct BaseApiDoc;

/// Combined documentation served at `/api-docs/openapi.json`
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseApiDoc::openapi();
        doc.merge(UserContextApiDoc::openapi());
        doc.merge(ChatApiDoc::openapi());
        doc
    }
}
