//! OpenAPI document and Swagger UI.
//!
//! # Responsibilities
//! - Describe all 25 entity operations with their request and response schemas
//! - Declare the `Authorization` header API key scheme
//! - Serve the document at `/swagger/doc.json` and a UI page at `/swagger/`
//!
//! # Design Decisions
//! - The document is assembled with utoipa builders from the same route
//!   table the router uses, so paths cannot drift from the served ones.
//! - The UI page is static HTML pulling swagger-ui from a CDN.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItemBuilder,
    PathsBuilder,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::response::{Response as ApiResponse, ResponseBuilder, ResponsesBuilder};
use utoipa::openapi::schema::{ComponentsBuilder, ObjectBuilder, Schema, SchemaType, Type};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{OpenApi, OpenApiBuilder, Ref, RefOr, Required};
use utoipa::{PartialSchema, ToSchema};

use crate::config::GatewayConfig;
use crate::http::error::ErrorResponse;
use crate::http::routes::{self, EntityRoutes};
use crate::rpc::proto::{Branch, Customer, Seller, Shop, SystemUser};
use crate::rpc::Entity;

pub const SECURITY_SCHEME: &str = "ApiKeyAuth";
pub const DOC_PATH: &str = "/swagger/doc.json";

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>API Gateway</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/swagger/doc.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

type Schemas = BTreeMap<String, RefOr<Schema>>;

/// Routes under `/swagger`.
pub fn router<S>(doc: OpenApi) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(DOC_PATH, get(openapi_json))
        .route("/swagger/", get(swagger_ui))
        .route("/swagger/index.html", get(swagger_ui))
        .with_state(Arc::new(doc))
}

async fn openapi_json(State(doc): State<Arc<OpenApi>>) -> Response {
    Json(doc.as_ref()).into_response()
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

/// Builds the complete OpenAPI document.
pub fn build_openapi(config: &GatewayConfig) -> OpenApi {
    let mut paths = PathsBuilder::new();
    let mut schemas = Schemas::new();

    collect::<ErrorResponse>(&mut schemas);
    paths = document_entity::<Customer>(paths, &mut schemas, &routes::CUSTOMER);
    paths = document_entity::<SystemUser>(paths, &mut schemas, &routes::SYSTEM_USER);
    paths = document_entity::<Seller>(paths, &mut schemas, &routes::SELLER);
    paths = document_entity::<Branch>(paths, &mut schemas, &routes::BRANCH);
    paths = document_entity::<Shop>(paths, &mut schemas, &routes::SHOP);

    let mut components = ComponentsBuilder::new();
    for (name, schema) in schemas {
        components = components.schema(name, schema);
    }
    components = components.security_scheme(
        SECURITY_SCHEME,
        SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
    );

    let info = InfoBuilder::new()
        .title(config.service_name.clone())
        .version(config.version.clone())
        .description(Some("REST gateway forwarding entity CRUD to the user service"))
        .build();

    OpenApiBuilder::new()
        .info(info)
        .paths(paths.build())
        .components(Some(components.build()))
        .build()
}

/// Registers `T` and every schema it references.
fn collect<T: ToSchema + PartialSchema>(schemas: &mut Schemas) -> String {
    let name = T::name().to_string();
    let mut found = vec![(name.clone(), <T as PartialSchema>::schema())];
    T::schemas(&mut found);
    for (key, schema) in found {
        schemas.entry(key).or_insert(schema);
    }
    name
}

fn document_entity<E: Entity>(
    paths: PathsBuilder,
    schemas: &mut Schemas,
    routes: &EntityRoutes,
) -> PathsBuilder {
    let entity = collect::<E>(schemas);
    let create = collect::<E::Create>(schemas);
    let update = collect::<E::Update>(schemas);
    let list = collect::<E::ListResponse>(schemas);
    let empty = collect::<E::Empty>(schemas);
    let name = E::NAME;

    let ops = [
        (
            routes.create,
            HttpMethod::Post,
            operation(routes.tag, format!("Create {name}"), &entity)
                .request_body(Some(json_body(&create, name))),
        ),
        (
            routes.list,
            HttpMethod::Get,
            operation(routes.tag, format!("Get list of {name}"), &list)
                .parameter(query_param("search", Type::String, "free-text search"))
                .parameter(query_param("page", Type::Integer, "1-based page, default 1"))
                .parameter(query_param("limit", Type::Integer, "page size, default 10")),
        ),
        (
            routes.get_by_id,
            HttpMethod::Get,
            operation(routes.tag, format!("Get {name} by id"), &entity)
                .parameter(id_param(name)),
        ),
        (
            routes.update,
            HttpMethod::Put,
            operation(routes.tag, format!("Update {name} by id"), &entity)
                .parameter(id_param(name))
                .request_body(Some(json_body(&update, name))),
        ),
        (
            routes.delete,
            HttpMethod::Delete,
            operation(routes.tag, format!("Delete {name} by id"), &empty)
                .parameter(id_param(name)),
        ),
    ];

    ops.into_iter().fold(paths, |paths, (path, method, op)| {
        let id = routes_operation_id(path);
        let item = PathItemBuilder::new()
            .operation(method, op.operation_id(Some(id)).build())
            .build();
        paths.path(path, item)
    })
}

fn operation(tag: &str, summary: String, success: &str) -> OperationBuilder {
    let responses = ResponsesBuilder::new()
        .response("200", json_response("OK", success))
        .response("400", json_response("Bad Request", "ErrorResponse"))
        .response("404", json_response("Not Found", "ErrorResponse"))
        .response("500", json_response("Internal Server Error", "ErrorResponse"))
        .build();

    OperationBuilder::new()
        .tag(tag)
        .summary(Some(summary))
        .responses(responses)
        .security(SecurityRequirement::new(SECURITY_SCHEME, Vec::<String>::new()))
}

fn json_response(description: &str, schema: &str) -> ApiResponse {
    let content = ContentBuilder::new()
        .schema(Some(RefOr::Ref(Ref::from_schema_name(schema))))
        .build();
    ResponseBuilder::new()
        .description(description)
        .content("application/json", content)
        .build()
}

fn json_body(schema: &str, entity: &str) -> RequestBody {
    let content = ContentBuilder::new()
        .schema(Some(RefOr::Ref(Ref::from_schema_name(schema))))
        .build();
    RequestBodyBuilder::new()
        .description(Some(entity.to_string()))
        .content("application/json", content)
        .required(Some(Required::True))
        .build()
}

fn id_param(entity: &str) -> Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(format!("{entity} id")))
        .schema(Some(scalar(Type::String)))
        .build()
}

fn query_param(name: &str, ty: Type, description: &str) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(scalar(ty)))
        .build()
}

fn scalar(ty: Type) -> Schema {
    Schema::Object(ObjectBuilder::new().schema_type(SchemaType::Type(ty)).build())
}

/// `/getbyidcustomer/{id}` becomes `getbyidcustomer`.
fn routes_operation_id(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
