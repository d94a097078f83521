use utoipa::{OpenApi, ToSchema};

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct HealthOk {
    pub ok: bool,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AboutResponse {
    pub service: String,
    pub version: String,
    pub contacts: usize,
    #[schema(example = json!(["GET /contatos", "GET /healthz"]))]
    pub endpoints: Vec<String>,
    #[schema(value_type = Vec<serde_json::Value>)]
    pub endpoints_meta: Vec<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::meta::healthz,
        crate::api::meta::about,
        crate::api::meta::openapi_json,
        crate::api::contacts::contacts_list,
        crate::api::contacts::contacts_search,
        crate::api::contacts::contacts_get,
        crate::api::contacts::contacts_create,
        crate::api::contacts::contacts_update,
        crate::api::contacts::contacts_delete,
    ),
    components(schemas(
        HealthOk,
        AboutResponse,
        agenda_core::Contact,
        agenda_core::ContactInput,
        crate::api::contacts::Removed,
        crate::responses::ProblemDetails,
    )),
    tags(
        (name = "Meta", description = "Service metadata and health"),
        (name = "Contatos", description = "Contact book CRUD")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_contact_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/contatos", "/contatos/buscar", "/contatos/{id}", "/healthz"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let yaml = doc.to_yaml().expect("yaml");
        assert!(yaml.contains("Contatos"));
    }
}
