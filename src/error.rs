use std::time::Duration;
use thiserror::Error;

/// Failures that end a verification run.
///
/// Parse misses and malformed URLs are not errors: they resolve to defaults.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("search request failed: {0}")]
    Search(String),

    #[error("generation request failed: {0}")]
    Generation(String),

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("model returned an empty completion")]
    EmptyCompletion,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(anyhow::Error),
}

impl VerifyError {
    fn duplicate(&self) -> Option<Self> {
        match self {
            VerifyError::Search(m) => Some(VerifyError::Search(m.clone())),
            VerifyError::Generation(m) => Some(VerifyError::Generation(m.clone())),
            VerifyError::Timeout(d) => Some(VerifyError::Timeout(*d)),
            VerifyError::EmptyCompletion => Some(VerifyError::EmptyCompletion),
            VerifyError::Config(m) => Some(VerifyError::Config(m.clone())),
            VerifyError::Other(_) => None,
        }
    }
}

/// Collaborators report through `anyhow`; a typed error anywhere in the chain
/// keeps its variant, context layers included.
impl From<anyhow::Error> for VerifyError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<VerifyError>() {
            Ok(typed) => return typed,
            Err(err) => err,
        };
        let typed = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<VerifyError>())
            .and_then(VerifyError::duplicate);
        match typed {
            Some(typed) => typed,
            None => VerifyError::Other(err),
        }
    }
}
