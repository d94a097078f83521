use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use crate::responses::{ApiError, DETAIL_MISSING_NAME};
use crate::AppState;
use agenda_core::{Contact, ContactInput};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive fragment of the contact name.
    #[serde(default)]
    pub nome: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Removed {
    #[schema(example = "removed")]
    pub message: String,
}

/// Any integer is a well-formed id; ones the store could never have assigned
/// (zero, negative, out of range) are simply not found.
fn contact_id(path: Result<Path<String>, PathRejection>) -> Result<u64, ApiError> {
    let Path(raw) = path?;
    let digits = raw.strip_prefix('-').unwrap_or(&raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(format!(
            "path parameter 'id' must be an integer, got {raw:?}"
        )));
    }
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(ApiError::not_found)
}

/// List every contact in insertion order.
#[utoipa::path(
    get,
    path = "/contatos",
    tag = "Contatos",
    responses((status = 200, description = "All contacts", body = [Contact]))
)]
pub async fn contacts_list(State(state): State<AppState>) -> Json<Vec<Contact>> {
    Json(state.with_contacts(|store| store.list_all().to_vec()))
}

/// Search contacts by name fragment.
#[utoipa::path(
    get,
    path = "/contatos/buscar",
    tag = "Contatos",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching contacts", body = [Contact]),
        (status = 400, description = "Missing, empty or malformed `nome`", body = crate::responses::ProblemDetails)
    )
)]
pub async fn contacts_search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let Query(params) = query?;
    let query = match params.nome {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ApiError::BadRequest(DETAIL_MISSING_NAME.into())),
    };
    let hits = state.with_contacts(|store| store.find_by_name(&query));
    debug!(query = %query, hits = hits.len(), "contact search");
    Ok(Json(hits))
}

/// Fetch one contact.
#[utoipa::path(
    get,
    path = "/contatos/{id}",
    tag = "Contatos",
    params(("id" = u64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact", body = Contact),
        (status = 404, description = "Unknown id", body = crate::responses::ProblemDetails)
    )
)]
pub async fn contacts_get(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id = contact_id(path)?;
    state
        .with_contacts(|store| store.get_by_id(id).cloned())
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Create a contact; the store assigns the id.
#[utoipa::path(
    post,
    path = "/contatos",
    tag = "Contatos",
    request_body = ContactInput,
    responses(
        (status = 201, description = "Created", body = Contact),
        (status = 422, description = "Invalid payload", body = crate::responses::ProblemDetails)
    )
)]
pub async fn contacts_create(
    State(state): State<AppState>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(input) = payload?;
    let fields = input.validate()?;
    let contact = state.with_contacts(|store| store.create(fields));
    info!(id = contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Replace every field of a contact, keeping its id.
#[utoipa::path(
    put,
    path = "/contatos/{id}",
    tag = "Contatos",
    params(("id" = u64, Path, description = "Contact id")),
    request_body = ContactInput,
    responses(
        (status = 200, description = "Updated", body = Contact),
        (status = 404, description = "Unknown id", body = crate::responses::ProblemDetails),
        (status = 422, description = "Invalid payload", body = crate::responses::ProblemDetails)
    )
)]
pub async fn contacts_update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id = contact_id(path)?;
    let Json(input) = payload?;
    let fields = input.validate()?;
    let contact = state
        .with_contacts(|store| store.update(id, fields))
        .ok_or_else(ApiError::not_found)?;
    info!(id, "contact updated");
    Ok(Json(contact))
}

/// Remove a contact. Its id is never reassigned.
#[utoipa::path(
    delete,
    path = "/contatos/{id}",
    tag = "Contatos",
    params(("id" = u64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Removed", body = Removed),
        (status = 404, description = "Unknown id", body = crate::responses::ProblemDetails)
    )
)]
pub async fn contacts_delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Removed>, ApiError> {
    let id = contact_id(path)?;
    if !state.with_contacts(|store| store.delete(id)) {
        return Err(ApiError::not_found());
    }
    info!(id, "contact removed");
    Ok(Json(Removed {
        message: "removed".into(),
    }))
}
