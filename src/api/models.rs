use serde::{Deserialize, Serialize, Serializer};

/// Ruleset tag sent when the caller does not name one.
pub const DEFAULT_TAG: &str = "latest";

/// Body for `POST /render`.
///
/// The server splits `filepaths` on newlines, so the wire format is a single
/// newline-delimited string. Callers work with a real list; the serializer
/// owns the delimiter.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRequest {
    #[serde(serialize_with = "newline_delimited")]
    pub filepaths: Vec<String>,
    pub current_meta: String,
    pub tag: String,
}

impl RenderRequest {
    pub fn new(filepaths: Vec<String>, current_meta: String, tag: Option<String>) -> Self {
        Self {
            filepaths,
            current_meta,
            tag: tag.unwrap_or_else(|| DEFAULT_TAG.to_string()),
        }
    }
}

fn newline_delimited<S>(paths: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&paths.join("\n"))
}

/// Error body returned by the server on a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
