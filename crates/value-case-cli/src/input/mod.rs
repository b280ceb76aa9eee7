pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed input document from `--input <path>` when given, otherwise
/// from piped stdin.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_document(path);
    }
    if let Some(value) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(value)?);
    }
    Err("--input <file> is required (or pipe a JSON document on stdin)".into())
}
