pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed input from a JSON file path, or from piped stdin when no
/// path is given.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }

    match stdin::read_stdin()? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Err("no input: pass --input <file> or pipe a JSON portfolio to stdin".into()),
    }
}
