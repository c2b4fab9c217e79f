use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, DashShapeError>;

#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    pub contexts: Vec<String>,
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, context) in self.contexts.iter().enumerate() {
            writeln!(f, "    Context[{i}]: {context}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum DashShapeError {
    #[error("Configuration error: {0}\n{1}")]
    ConfigurationError(String, ErrorContext),

    #[error("Source fetch error: {0}\n{1}")]
    SourceFetchError(String, ErrorContext),

    #[error("Internal error: {0}\n{1}")]
    InternalError(String, ErrorContext),

    #[error("Serde JSON Error: {0}\n{1}")]
    SerdeJsonError(serde_json::Error, ErrorContext),
}

impl DashShapeError {
    /// Append a new context level to the error
    pub fn with_context<S, F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        use DashShapeError::*;
        match self {
            ConfigurationError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                DashShapeError::ConfigurationError(msg, context)
            }
            SourceFetchError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                DashShapeError::SourceFetchError(msg, context)
            }
            InternalError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                DashShapeError::InternalError(msg, context)
            }
            SerdeJsonError(err, mut context) => {
                context.contexts.push(context_fn().into());
                DashShapeError::SerdeJsonError(err, context)
            }
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError(message.into(), Default::default())
    }

    pub fn source_fetch<S: Into<String>>(message: S) -> Self {
        Self::SourceFetchError(message.into(), Default::default())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::InternalError(message.into(), Default::default())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, DashShapeError::ConfigurationError(..))
    }
}

pub trait ResultWithContext<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<R, E> ResultWithContext<R> for result::Result<R, E>
where
    E: Into<DashShapeError>,
{
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Ok(val) => Ok(val),
            Err(err) => {
                let dash_shape_error: DashShapeError = err.into();
                Err(dash_shape_error.with_context(context_fn))
            }
        }
    }
}

impl<R> ResultWithContext<R> for Option<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Some(val) => Ok(val),
            None => Err(DashShapeError::internal(context_fn().into())),
        }
    }
}

impl From<serde_json::Error> for DashShapeError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJsonError(err, Default::default())
    }
}
