//! Typed extraction: moves document values into [`Configuration`] fields.
//!
//! Extraction never fails. If a key is absent or its value cannot be
//! represented by the destination type, the destination keeps whatever it held
//! before.

use serde_json::Value;
use tracing::warn;

use super::document::{lookup, ConfigDocument};
use super::schema::{ExtractionStage, FieldGate, FieldTarget, SchemaField, SCHEMA};
use super::structure::Configuration;


pub fn extract_boolean(value: Option<&Value>, destination: &mut bool) -> bool {
    match value {
        Some(Value::Bool(flag)) => {
            *destination = *flag;
            true
        }
        _ => false,
    }
}

/// Like [`extract_boolean`], but numbers are accepted too (non-zero is `true`).
pub fn extract_boolean_like(value: Option<&Value>, destination: &mut bool) -> bool {
    match value {
        Some(Value::Bool(flag)) => {
            *destination = *flag;
            true
        }
        Some(Value::Number(number)) => match number.as_f64() {
            Some(number) => {
                *destination = number != 0.0;
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Accepts integral numbers that fit in an `i32`, including floats without a
/// fractional part (`12.0`).
pub fn extract_integer(value: Option<&Value>, destination: &mut i32) -> bool {
    let Some(integer) = value
        .and_then(as_integral)
        .and_then(|integer| i32::try_from(integer).ok())
    else {
        return false;
    };

    *destination = integer;
    true
}

fn as_integral(value: &Value) -> Option<i64> {
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }

    let float = value.as_f64()?;
    if float.fract() != 0.0 || float < i64::MIN as f64 || float > i64::MAX as f64 {
        return None;
    }

    Some(float as i64)
}

pub fn extract_string(value: Option<&Value>, destination: &mut String) -> bool {
    match value {
        Some(Value::String(string)) => {
            destination.clone_from(string);
            true
        }
        _ => false,
    }
}

/// Accepts an array (non-string elements are skipped) or a single string.
pub fn extract_string_list(value: Option<&Value>, destination: &mut Vec<String>) -> bool {
    match value {
        Some(Value::Array(elements)) => {
            *destination = elements
                .iter()
                .filter_map(|element| element.as_str().map(str::to_string))
                .collect();
            true
        }
        Some(Value::String(string)) => {
            *destination = vec![string.clone()];
            true
        }
        _ => false,
    }
}


/// Extracts one schema field from `document` into `configuration`.
pub fn extract_field(
    document: &ConfigDocument,
    schema_field: &SchemaField,
    configuration: &mut Configuration,
) -> bool {
    let value = lookup(document, schema_field.object, schema_field.key);

    let extracted = match schema_field.target {
        FieldTarget::Boolean(target) => extract_boolean(value, target(configuration)),
        FieldTarget::BooleanLike(target) => extract_boolean_like(value, target(configuration)),
        FieldTarget::Integer(target) => extract_integer(value, target(configuration)),
        FieldTarget::String(target) => extract_string(value, target(configuration)),
        FieldTarget::StringList(target) => extract_string_list(value, target(configuration)),
    };

    if let (false, Some(value)) = (extracted, value) {
        warn!(
            field = %schema_field.display_name(),
            "Cannot use configuration value {}, keeping the previous one.", value
        );
    }

    extracted
}

/// Extracts every field of `stage` whose gate is open.
pub fn extract_stage<G>(
    document: &ConfigDocument,
    stage: ExtractionStage,
    gate_is_open: G,
    configuration: &mut Configuration,
) where
    G: Fn(FieldGate) -> bool,
{
    for schema_field in SCHEMA
        .iter()
        .filter(|schema_field| schema_field.stage == stage && gate_is_open(schema_field.gate))
    {
        extract_field(document, schema_field, configuration);
    }
}

/// Extracts every field regardless of stage or gate.
pub fn extract_all(document: &ConfigDocument, configuration: &mut Configuration) {
    for schema_field in SCHEMA {
        extract_field(document, schema_field, configuration);
    }
}
