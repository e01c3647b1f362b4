//! The data schema document (a JSON Schema), referenced by control scopes.

use crate::error::DocumentError;
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON Schema describing the shape of the form data.
///
/// Loosely coupled to the UI schema: controls point into it by scope and
/// nothing in the UI schema embeds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSchema(Value);

impl DataSchema {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse JSON Schema text.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Follow `scope` into the schema. Object members are looked up by key,
    /// arrays by numeric index.
    pub fn resolve(&self, scope: &Scope) -> Option<&Value> {
        scope
            .segments()
            .iter()
            .try_fold(&self.0, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    /// Parse `scope` and resolve it.
    pub fn resolve_str(&self, scope: &str) -> Result<Option<&Value>, DocumentError> {
        let scope = Scope::parse(scope)?;
        Ok(self.resolve(&scope))
    }

    /// Existence check: does `scope` parse and point at something?
    pub fn contains(&self, scope: &str) -> bool {
        matches!(self.resolve_str(scope), Ok(Some(_)))
    }
}

/// Names of the `properties` of an object schema, in declaration order.
pub(crate) fn property_names(schema: &Value) -> impl Iterator<Item = &str> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|props| props.keys().map(String::as_str))
}
