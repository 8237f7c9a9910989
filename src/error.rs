use thiserror::Error;

/// Conditions under which a routing call fails. Not finding a path is not one of them:
/// that is reported as an empty route.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("search budget exceeded after {expansions} expansions")]
    SearchBudgetExceeded { expansions: usize },
}

pub type Result<T> = std::result::Result<T, RouteError>;

impl RouteError {
    pub(crate) fn invalid(msg: impl Into<String>) -> RouteError {
        RouteError::InvalidArgument(msg.into())
    }
}
