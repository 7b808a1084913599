//! Source loader: reads one configuration document from disk.
//!
//! This is the only place the cascade reads files. A missing file, unreadable
//! content and a non-object top level all produce an empty document.

use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::LoadError;


/// Outcome of reading a document, before fallbacks are applied.
#[derive(Debug)]
pub enum LoadedDocument {
    /// Nothing exists at the path.
    Absent,
    /// The file parsed; the top level may be any kind.
    Parsed(Value),
}


/// Reads and parses the document at `path`.
///
/// Documents are JSON5, so comments, trailing commas and unquoted keys are
/// accepted. Content that is not UTF-8 is decoded from its detected encoding.
pub fn try_load_document(path: &Path) -> Result<LoadedDocument, LoadError> {
    if !path.exists() {
        return Ok(LoadedDocument::Absent);
    }

    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut contents = decode_contents(bytes).map_err(|encoding| LoadError::Encoding {
        path: path.to_path_buf(),
        encoding: encoding.name(),
    })?;

    // Editors on Windows like to prepend a byte order mark.
    if contents.starts_with('\u{feff}') {
        contents.drain(..'\u{feff}'.len_utf8());
    }

    let value = json5::from_str::<Value>(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LoadedDocument::Parsed(value))
}


/// Returns UTF-8 content unchanged, otherwise decodes it with the most likely
/// legacy encoding (e.g. Shift_JIS). Fails with the guessed encoding if the
/// bytes are not valid in it either.
fn decode_contents(bytes: Vec<u8>) -> Result<String, &'static Encoding> {
    let bytes = match String::from_utf8(bytes) {
        Ok(contents) => return Ok(contents),
        Err(error) => error.into_bytes(),
    };

    let mut detector = EncodingDetector::new();
    detector.feed(&bytes, true);
    let encoding = detector.guess(None, false);

    match encoding.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(contents) => {
            debug!(encoding = encoding.name(), "Decoded non-UTF-8 configuration document.");
            Ok(contents.into_owned())
        }
        None => Err(encoding),
    }
}


/// Loads the document at `path`, always returning an object.
///
/// If loading fails, the error is passed to `on_failure` (after being logged)
/// and an empty object is returned.
pub fn load_document_reporting<F>(path: &Path, on_failure: F) -> Value
where
    F: FnOnce(LoadError),
{
    match try_load_document(path) {
        Ok(LoadedDocument::Absent) => {
            debug!(path = %path.display(), "No configuration document at path.");
            Value::Object(Map::new())
        }
        Ok(LoadedDocument::Parsed(value @ Value::Object(_))) => {
            debug!(path = %path.display(), "Loaded configuration document.");
            value
        }
        Ok(LoadedDocument::Parsed(_)) => {
            debug!(
                path = %path.display(),
                "Configuration document is not an object, ignoring it."
            );
            Value::Object(Map::new())
        }
        Err(error) => {
            warn!(
                path = %error.path().display(),
                "Failed to parse configuration: {}",
                describe_load_error(&error)
            );
            on_failure(error);

            Value::Object(Map::new())
        }
    }
}

/// Loads the document at `path`, always returning an object.
pub fn load_document(path: &Path) -> Value {
    load_document_reporting(path, |_| {})
}


/// Renders the error together with its cause.
pub fn describe_load_error(error: &LoadError) -> String {
    match std::error::Error::source(error) {
        Some(cause) => format!("{}: {}", error, cause),
        None => error.to_string(),
    }
}
