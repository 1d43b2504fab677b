//! Generic machinery for a validated CRUD resource.
//!
//! A record type declares its envelope names and validation rulesets once by
//! implementing [`Resource`]; the handlers in [`controller`] and the stores
//! in [`repository`] are generic over it. Stamping out a new resource means
//! implementing the trait for its record type and nesting
//! [`controller::router`] under a new path.

pub mod controller;
pub mod repository;

pub use controller::router;
pub use repository::{InMemoryRepository, Repository};

use crate::error::ApiError;
use crate::validation::{FieldMap, Ruleset};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Key for a single record in envelopes, e.g. `"board"`.
    const SINGULAR: &'static str;
    /// Key for collections in envelopes, e.g. `"boards"`.
    const PLURAL: &'static str;
    /// Capitalized name used in messages, e.g. `"Board"`.
    const LABEL: &'static str;

    /// Constraints applied when creating a record.
    fn create_rules() -> Ruleset;

    /// Constraints applied when updating: same formats, nothing required.
    fn update_rules() -> Ruleset {
        Self::create_rules().without_required()
    }

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Build a record from the raw submitted fields. Every non-id field
    /// comes from the map, so a field absent from the body comes out null;
    /// any `id` submitted in the body is discarded in favor of `id`.
    fn from_fields(id: &str, fields: &FieldMap) -> Result<Self, ApiError> {
        let mut map = fields.clone();
        map.insert("id".to_owned(), Value::String(id.to_owned()));
        serde_json::from_value(Value::Object(map)).map_err(ApiError::from)
    }
}
