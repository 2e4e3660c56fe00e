use serde::{Deserialize, Serialize};

/// The combined error type for the config builder and for API errors
///
/// Every operation exposed by the resource traits returns [`Error::Context`], which prefixes the
/// underlying failure with a short description of the operation, e.g. `Failed to fetch sites`.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Serialize)]
pub enum Error {
    #[error("Builder error: {0}")]
    Builder(BuilderError),

    #[error(transparent)]
    Runtime(RuntimeError),

    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with an operation description
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The outermost operation description, if the error carries one
    pub fn context(&self) -> Option<&str> {
        match self {
            Error::Context { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Shorthand for a runtime error about a missing response field
    pub(crate) fn missing_field(field: &'static str) -> Self {
        From::from(RuntimeError::MissingField(field.to_string()))
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Deserialize, Serialize)]
pub enum BuilderError {
    #[error("Failed to build config from environment variables, {0} is missing.")]
    MissingEnv(String),

    #[error("Failed to build config, no client id was provided")]
    MissingClientId,

    #[error("Failed to build config, no client secret was provided")]
    MissingClientSecret,

    #[error("Failed to build config, invalid entrypoint: {0}")]
    InvalidEntrypoint(String),
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Deserialize, Serialize)]
pub enum RuntimeError {
    #[error("Failed to get valid response from server: {0}")]
    Response(String),

    #[error("Failed to deserialize the response: {0}")]
    Deserialization(String),

    #[error("Failed to serialize the request body: {0}")]
    Serialization(String),

    #[error("Failed to parse item into valid URI: {0}")]
    InvalidUri(String),

    #[error("No access token, the client has not been authenticated")]
    Unauthenticated,

    #[error("Response is missing the `{0}` field")]
    MissingField(String),

    #[error("Could not find {0}")]
    NotFound(String),
}

impl From<RuntimeError> for Error {
    fn from(value: RuntimeError) -> Self {
        Error::Runtime(value)
    }
}

impl From<BuilderError> for Error {
    fn from(value: BuilderError) -> Self {
        Error::Builder(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::debug!(error = ?value, "Transport error");
        Error::Runtime(RuntimeError::Response(value.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Runtime(RuntimeError::Deserialization(value.to_string()))
    }
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Self {
        Self::Runtime(RuntimeError::InvalidUri(value.to_string()))
    }
}

/// Attach an operation description to the error side of a result
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, Error> {
    fn context(self, context: impl Into<String>) -> Result<T, Error> {
        self.map_err(|error| error.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prefixes_message() {
        let error = Error::from(RuntimeError::Response("404 Not Found".into()))
            .with_context("Failed to delete radio");

        assert_eq!(
            error.to_string(),
            "Failed to delete radio: Failed to get valid response from server: 404 Not Found"
        );
        assert_eq!(error.context(), Some("Failed to delete radio"));
    }

    #[test]
    fn nested_context_keeps_both_prefixes() {
        let result: Result<(), Error> = Err(Error::missing_field("objects"));
        let error = result
            .context("Failed to fetch sites")
            .context("Failed to create radio")
            .unwrap_err();

        assert_eq!(error.context(), Some("Failed to create radio"));
        assert_eq!(
            error.to_string(),
            "Failed to create radio: Failed to fetch sites: Response is missing the `objects` field"
        );
    }

    #[test]
    fn builder_errors_have_no_context() {
        let error = Error::from(BuilderError::MissingClientId);
        assert_eq!(error.context(), None);
        assert!(error.to_string().starts_with("Builder error"));
    }
}
