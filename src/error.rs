use failure::Fail;
use serde_json::Error as JsonError;

#[derive(Debug, Fail)]
pub enum GrafanaAuthError {
    #[fail(display = "JSON error: {}", _0)]
    JsonError(JsonError),

    #[fail(display = "Schema error: {}", _0)]
    SchemaError(String),
}

impl From<JsonError> for GrafanaAuthError {
    fn from(err: JsonError) -> Self {
        GrafanaAuthError::JsonError(err)
    }
}

impl From<GrafanaAuthError> for String {
    fn from(err: GrafanaAuthError) -> Self {
        format!("{}", err)
    }
}
