//! Error types for the search actions.

use search_actions_repository::SearchError;
use search_actions_shared::ActionPattern;
use thiserror::Error;

/// Errors returned by a search action.
///
/// Two classes matter to callers. `Misuse` is a contract violation by the
/// caller (a required field is missing) and is raised before any call to the
/// search engine. `Search` is an operational failure reported by the engine or
/// the transport and is forwarded unchanged.
#[derive(Error, Debug)]
pub enum ActionError {
    /// The caller broke the action's contract.
    #[error("Misuse: {0}")]
    Misuse(String),

    /// The search engine call failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// No handler is registered for the message's role and cmd.
    #[error("No handler registered for {0}")]
    NoHandler(ActionPattern),

    /// The message could not be decoded into the action's request.
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

impl ActionError {
    /// Create a misuse error.
    pub fn misuse(msg: impl Into<String>) -> Self {
        Self::Misuse(msg.into())
    }

    /// Create an invalid message error.
    pub fn invalid_message(msg: impl Into<String>) -> Self {
        Self::InvalidMessage(msg.into())
    }

    /// Whether this error is a caller contract violation.
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::Misuse(_))
    }

    /// A short, stable name for the error kind, used in wire replies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Misuse(_) => "misuse",
            Self::Search(e) => e.kind(),
            Self::NoHandler(_) => "no_handler",
            Self::InvalidMessage(_) => "invalid_message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_is_transparent() {
        let err: ActionError = SearchError::index("status 503").into();
        assert_eq!(err.to_string(), "Index error: status 503");
        assert_eq!(err.kind(), "index");
        assert!(!err.is_misuse());
    }

    #[test]
    fn test_no_handler_names_pattern() {
        let err = ActionError::NoHandler(ActionPattern::search("reindex"));
        assert_eq!(
            err.to_string(),
            "No handler registered for role:search,cmd:reindex"
        );
    }

    #[test]
    fn test_misuse_kind() {
        let err = ActionError::misuse("missing data");
        assert!(err.is_misuse());
        assert_eq!(err.kind(), "misuse");
    }
}
