//! Configuration merge logic
//!
//! Merges a source document into the working document under a closed schema:
//! - Keys the destination does not have: ignored
//! - Objects on both sides: left for the caller to descend into
//! - Same kind (or a null destination): source replaces destination wholesale
//! - Different kinds: skipped, recorded as a [`MergeDiagnostic`]

use std::fmt::{self, Display, Formatter};

use serde_json::Value;
use tracing::warn;

use super::document::{ConfigDocument, Kind};
use super::schema::nested_object_names;


/// A source value rejected because its kind differs from the destination's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeDiagnostic {
    /// Name of the object being merged, empty for the top level.
    pub object_name: String,

    pub key: String,

    pub expected: Kind,

    pub found: Kind,
}

impl Display for MergeDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.object_name.is_empty() {
            write!(f, "{}", self.key)?;
        } else {
            write!(f, "{}.{}", self.object_name, self.key)?;
        }

        write!(f, " expects {}, found {}", self.expected, self.found)
    }
}


/// Merges the entries of `source` into `destination`.
///
/// Returns `false` without touching `destination` if `source` is not an object,
/// otherwise whether any value was assigned.
pub fn merge_into(
    destination: &mut ConfigDocument,
    source: &Value,
    object_name: &str,
    diagnostics: &mut Vec<MergeDiagnostic>,
) -> bool {
    let Value::Object(source_object) = source else {
        return false;
    };

    let mut assigned = false;

    for (key, source_value) in source_object {
        let Some(destination_value) = destination.get_mut(key) else {
            continue;
        };

        match (Kind::of(destination_value), Kind::of(source_value)) {
            // Nested objects are merged by the caller.
            (Kind::Object, Kind::Object) => {}

            (Kind::Null, _) => {
                *destination_value = source_value.clone();
                assigned = true;
            }

            (expected, found) if expected == found => {
                *destination_value = source_value.clone();
                assigned = true;
            }

            (expected, found) => {
                let diagnostic = MergeDiagnostic {
                    object_name: object_name.to_string(),
                    key: key.clone(),
                    expected,
                    found,
                };

                warn!("Invalid variable in configuration: {}", diagnostic);
                diagnostics.push(diagnostic);
            }
        }
    }

    assigned
}


/// Merges `source` into `destination`, then merges each nested object the
/// schema declares (e.g. `bindingNames`) key by key.
pub fn merge_with_nested_objects(
    destination: &mut ConfigDocument,
    source: &Value,
    diagnostics: &mut Vec<MergeDiagnostic>,
) -> bool {
    let mut assigned = merge_into(destination, source, "", diagnostics);

    for object_name in nested_object_names() {
        let (Some(Value::Object(nested_destination)), Some(nested_source)) =
            (destination.get_mut(object_name), source.get(object_name))
        else {
            continue;
        };

        assigned |= merge_into(nested_destination, nested_source, object_name, diagnostics);
    }

    assigned
}
