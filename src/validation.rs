//! Field-level request validation.
//!
//! Rules run against the raw JSON body rather than a typed payload, so a
//! single pass can report every violation instead of stopping at the first
//! field serde fails to decode. Format rules only constrain values that were
//! actually submitted; [`Rule::Required`] is the only rule that fires on an
//! absent field.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Violation messages per field, keyed by field name.
pub type Violations = BTreeMap<String, Vec<String>>;

/// Raw request body: field name to submitted value.
pub type FieldMap = Map<String, Value>;

// Syntactic check only: one @, no whitespace, a dot in the domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present, non-null, and not a blank string.
    Required,
    /// Must be a JSON string.
    Str,
    /// Maximum length in characters, for string values.
    MaxLen(usize),
    /// Syntactically valid email address.
    Email,
    /// Must be a JSON boolean.
    Boolean,
    /// RFC 3339, `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DD`.
    Date,
    /// One of a fixed set of string values.
    OneOf(&'static [&'static str]),
}

impl Rule {
    fn check(&self, field: &str, value: Option<&Value>) -> Option<String> {
        match self {
            Rule::Required => {
                let missing = match value {
                    None | Some(Value::Null) => true,
                    Some(Value::String(s)) => s.trim().is_empty(),
                    Some(_) => false,
                };
                missing.then(|| format!("The {field} field is required"))
            }
            rule => match value {
                Some(value) if !value.is_null() => rule.check_present(field, value),
                _ => None,
            },
        }
    }

    fn check_present(&self, field: &str, value: &Value) -> Option<String> {
        match self {
            Rule::Required => None,
            Rule::Str => (!value.is_string()).then(|| format!("The {field} must be a string")),
            Rule::MaxLen(max) => match value.as_str() {
                Some(s) if s.chars().count() > *max => Some(format!(
                    "The {field} may not be greater than {max} characters"
                )),
                _ => None,
            },
            Rule::Email => {
                let ok = value.as_str().is_some_and(|s| EMAIL_RE.is_match(s));
                (!ok).then(|| format!("The {field} must be a valid email address"))
            }
            Rule::Boolean => (!value.is_boolean())
                .then(|| format!("The {field} field must be true or false")),
            Rule::Date => {
                let ok = value.as_str().is_some_and(parses_as_date);
                (!ok).then(|| format!("The {field} is not a valid date"))
            }
            Rule::OneOf(allowed) => {
                let ok = value.as_str().is_some_and(|s| allowed.contains(&s));
                (!ok).then(|| format!("The selected {field} is invalid"))
            }
        }
    }
}

fn parses_as_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Ordered set of per-field constraints applied during create or update.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    rules: Vec<(&'static str, Vec<Rule>)>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: &[Rule]) -> Self {
        self.rules.push((name, rules.to_vec()));
        self
    }

    /// The update-time relaxation: same format checks, nothing required.
    pub fn without_required(mut self) -> Self {
        for (_, rules) in &mut self.rules {
            rules.retain(|rule| *rule != Rule::Required);
        }
        self
    }
}

/// Run every rule against the submitted fields, collecting all violations.
/// An empty result means the body passed.
pub fn validate(fields: &FieldMap, ruleset: &Ruleset) -> Violations {
    let mut violations = Violations::new();
    for (field, rules) in &ruleset.rules {
        for rule in rules {
            if let Some(message) = rule.check(field, fields.get(*field)) {
                violations
                    .entry((*field).to_owned())
                    .or_default()
                    .push(message);
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_required_rejects_absent_null_and_blank() {
        let ruleset = Ruleset::new().field("name", &[Rule::Required]);

        for body in [json!({}), json!({"name": null}), json!({"name": "  "})] {
            let violations = validate(&fields(body), &ruleset);
            assert_eq!(violations["name"], vec!["The name field is required"]);
        }

        assert!(validate(&fields(json!({"name": "A"})), &ruleset).is_empty());
    }

    #[test]
    fn test_format_rules_skip_absent_values() {
        let ruleset = Ruleset::new()
            .field("email", &[Rule::Email])
            .field("read_at", &[Rule::Date]);

        assert!(validate(&fields(json!({})), &ruleset).is_empty());
        assert!(validate(&fields(json!({"email": null})), &ruleset).is_empty());
    }

    #[test]
    fn test_email_rule() {
        let ruleset = Ruleset::new().field("email", &[Rule::Email]);

        assert!(validate(&fields(json!({"email": "a@x.com"})), &ruleset).is_empty());

        for bad in [json!("not-an-email"), json!("a @x.com"), json!(42)] {
            let violations = validate(&fields(json!({"email": bad})), &ruleset);
            assert_eq!(
                violations["email"],
                vec!["The email must be a valid email address"]
            );
        }
    }

    #[test]
    fn test_max_len_counts_characters() {
        let ruleset = Ruleset::new().field("name", &[Rule::Str, Rule::MaxLen(3)]);

        assert!(validate(&fields(json!({"name": "åäö"})), &ruleset).is_empty());

        let violations = validate(&fields(json!({"name": "åäöü"})), &ruleset);
        assert_eq!(
            violations["name"],
            vec!["The name may not be greater than 3 characters"]
        );
    }

    #[test]
    fn test_boolean_rule_rejects_strings_and_numbers() {
        let ruleset = Ruleset::new().field("favorite", &[Rule::Boolean]);

        assert!(validate(&fields(json!({"favorite": true})), &ruleset).is_empty());

        for bad in [json!("true"), json!(1)] {
            let violations = validate(&fields(json!({"favorite": bad})), &ruleset);
            assert_eq!(
                violations["favorite"],
                vec!["The favorite field must be true or false"]
            );
        }
    }

    #[test]
    fn test_date_rule_accepts_common_formats() {
        let ruleset = Ruleset::new().field("read_at", &[Rule::Date]);

        for good in ["2024-01-31", "2024-01-31 08:30:00", "2024-01-31T08:30:00Z"] {
            assert!(
                validate(&fields(json!({"read_at": good})), &ruleset).is_empty(),
                "{good} should be a valid date"
            );
        }

        let violations = validate(&fields(json!({"read_at": "yesterday"})), &ruleset);
        assert_eq!(violations["read_at"], vec!["The read_at is not a valid date"]);
    }

    #[test]
    fn test_one_of_rule() {
        let ruleset = Ruleset::new().field("theme", &[Rule::OneOf(&["light", "dark"])]);

        assert!(validate(&fields(json!({"theme": "dark"})), &ruleset).is_empty());

        let violations = validate(&fields(json!({"theme": "blue"})), &ruleset);
        assert_eq!(violations["theme"], vec!["The selected theme is invalid"]);
    }

    #[test]
    fn test_all_violations_are_collected() {
        let ruleset = Ruleset::new()
            .field("name", &[Rule::Required, Rule::Str])
            .field("email", &[Rule::Required, Rule::Email])
            .field("favorite", &[Rule::Required, Rule::Boolean]);

        let violations = validate(&fields(json!({"email": "nope"})), &ruleset);

        assert_eq!(violations.len(), 3);
        assert_eq!(violations["name"], vec!["The name field is required"]);
        assert_eq!(
            violations["email"],
            vec!["The email must be a valid email address"]
        );
        assert_eq!(
            violations["favorite"],
            vec!["The favorite field is required"]
        );
    }

    #[test]
    fn test_without_required_keeps_format_rules() {
        let ruleset = Ruleset::new()
            .field("name", &[Rule::Required, Rule::Str, Rule::MaxLen(255)])
            .without_required();

        // absent name no longer fails
        assert!(validate(&fields(json!({})), &ruleset).is_empty());

        // but a present name is still format-checked
        let violations = validate(&fields(json!({"name": 7})), &ruleset);
        assert_eq!(violations["name"], vec!["The name must be a string"]);
    }
}
