//! The five CRUD handlers, generic over [`Resource`].
//!
//! Each handler is a stateless single-pass transform: one validation pass
//! (create/update) and one call into the repository. Not-found and
//! validation failures surface as [`ApiError`] and render as `{status, ...}`
//! envelopes; everything else propagates.

use super::{Repository, Resource};
use crate::common::Envelope;
use crate::error::ApiError;
use crate::validation::{self, FieldMap};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use tracing::debug;

type Repo<R> = Arc<dyn Repository<R>>;

/// CRUD routes for a resource; nest under `/<plural>`.
pub fn router<R: Resource>(repo: Repo<R>) -> Router {
    Router::new()
        .route("/", get(index::<R>).post(store::<R>))
        .route(
            "/{id}",
            get(show::<R>)
                .put(update::<R>)
                .patch(update::<R>)
                .delete(destroy::<R>),
        )
        .with_state(repo)
}

/// `GET /` — every record, in store order. An empty store is an empty
/// array, not an error.
async fn index<R: Resource>(State(repo): State<Repo<R>>) -> Result<Envelope, ApiError> {
    debug!(resource = R::PLURAL, "index");

    let records = repo.find_all().await;

    Envelope::collection(R::PLURAL, &records)
}

/// `GET /{id}`
async fn show<R: Resource>(
    State(repo): State<Repo<R>>,
    Path(id): Path<String>,
) -> Result<Envelope, ApiError> {
    debug!(resource = R::SINGULAR, %id, "show");

    let record = repo
        .find_by_id(&id)
        .await
        .ok_or(ApiError::not_found(R::LABEL))?;

    Envelope::record(R::SINGULAR, &record)
}

/// `POST /` — validate, persist, answer 200 with the stored record.
///
/// Success is deliberately 200 rather than 201; existing callers depend on
/// it.
async fn store<R: Resource>(
    State(repo): State<Repo<R>>,
    Json(fields): Json<FieldMap>,
) -> Result<Envelope, ApiError> {
    debug!(resource = R::SINGULAR, "store");

    let violations = validation::validate(&fields, &R::create_rules());
    if !violations.is_empty() {
        debug!(resource = R::SINGULAR, ?violations, "store validation failed");
        return Err(ApiError::ValidationFailed { errors: violations });
    }

    let record = R::from_fields("", &fields)?;
    let record = repo.insert(record).await;
    debug!(resource = R::SINGULAR, id = record.id(), "store saved");

    Envelope::record(R::SINGULAR, &record)
}

/// `PUT/PATCH /{id}` — full replacement, not a partial patch: the stored
/// record is rebuilt from the body, so omitted fields are written back null.
async fn update<R: Resource>(
    State(repo): State<Repo<R>>,
    Path(id): Path<String>,
    Json(fields): Json<FieldMap>,
) -> Result<Envelope, ApiError> {
    debug!(resource = R::SINGULAR, %id, "update");

    // Validation runs before the existence check, so a malformed body
    // against a missing id reports 422, not 404.
    let violations = validation::validate(&fields, &R::update_rules());
    if !violations.is_empty() {
        debug!(resource = R::SINGULAR, ?violations, "update validation failed");
        return Err(ApiError::ValidationFailed { errors: violations });
    }

    let current = repo
        .find_by_id(&id)
        .await
        .ok_or(ApiError::not_found(R::LABEL))?;

    let record = R::from_fields(current.id(), &fields)?;
    let record = repo.save(record).await;
    debug!(resource = R::SINGULAR, id = record.id(), "update saved");

    Envelope::record(R::SINGULAR, &record)
}

/// `DELETE /{id}` — permanent removal, no soft delete.
async fn destroy<R: Resource>(
    State(repo): State<Repo<R>>,
    Path(id): Path<String>,
) -> Result<Envelope, ApiError> {
    debug!(resource = R::SINGULAR, %id, "destroy");

    if !repo.remove(&id).await {
        return Err(ApiError::not_found(R::LABEL));
    }

    Ok(Envelope::message(
        StatusCode::OK,
        format!("{} {id} deleted", R::LABEL),
    ))
}
