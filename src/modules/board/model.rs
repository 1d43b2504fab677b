use crate::resource::Resource;
use crate::validation::{Rule, Ruleset};
use serde::{Deserialize, Serialize};

/// Board color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// A single board, as stored and as serialized in envelopes.
///
/// Every field except `id` is nullable: update rebuilds the record from the
/// request body wholesale, so anything the caller leaves out ends up null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub favorite: Option<bool>,
    pub read_at: Option<String>,
    pub href: Option<String>,
    pub image: Option<String>,
    pub theme: Option<Theme>,
}

impl Resource for Board {
    const SINGULAR: &'static str = "board";
    const PLURAL: &'static str = "boards";
    const LABEL: &'static str = "Board";

    fn create_rules() -> Ruleset {
        Ruleset::new()
            .field("name", &[Rule::Required, Rule::Str, Rule::MaxLen(255)])
            .field("email", &[Rule::Required, Rule::Email])
            .field("favorite", &[Rule::Required, Rule::Boolean])
            .field("read_at", &[Rule::Date])
            .field("theme", &[Rule::OneOf(&["light", "dark"])])
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
