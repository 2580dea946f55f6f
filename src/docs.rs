//! OpenAPI description and Swagger UI, served in development only.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::models::{Todo, TodoInput};
use crate::routes::todos;

pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";

const BEARER_DESCRIPTION: &str = "JWT Authorization header using the Bearer scheme.\r\n\r\n\
Enter 'Bearer' [space] and then your token in the text input below.\r\n\r\n\
Example: \"Bearer 12345abcdef\"";

#[derive(OpenApi)]
#[openapi(
    info(title = "todoApi", version = "v1"),
    paths(
        todos::list_todos,
        todos::create_todo,
        todos::get_todo,
        todos::update_todo,
        todos::delete_todo
    ),
    components(schemas(Todo, TodoInput)),
    modifiers(&BearerScheme),
    security(("Bearer" = []))
)]
pub struct ApiDoc;

/// Registers the `Bearer` scheme: an API key read from the `Authorization` header.
struct BearerScheme;

impl Modify for BearerScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                BEARER_DESCRIPTION,
            ))),
        );
    }
}

/// Swagger UI under `/swagger/`, backed by the document at [`OPENAPI_PATH`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger/{_:.*}").url(OPENAPI_PATH, ApiDoc::openapi())
}
