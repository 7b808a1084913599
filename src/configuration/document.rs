//! The untyped document model used while the cascade runs.
//!
//! Documents are plain [`serde_json::Value`] trees. Every merge and extraction
//! decision pattern-matches on the value variant; [`Kind`] is the coarse
//! category that merge compares.

use std::fmt::{self, Display, Formatter};

use serde_json::{Map, Value};


/// A top-level configuration object.
pub type ConfigDocument = Map<String, Value>;


/// Coarse value category of a document entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl Kind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Bool(_) => Kind::Boolean,
            Value::Null => Kind::Null,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
        };

        f.write_str(name)
    }
}


/// Looks up `key`, optionally inside the nested object `object`.
pub fn lookup<'d>(document: &'d ConfigDocument, object: Option<&str>, key: &str) -> Option<&'d Value> {
    match object {
        Some(object_name) => document.get(object_name)?.as_object()?.get(key),
        None => document.get(key),
    }
}
