//! Role/cmd action registry.
//!
//! Handlers take the whole action message as JSON and resolve to a JSON
//! result. The registry only routes; decoding a message into a typed request is
//! the handler's job.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use search_actions_shared::ActionPattern;
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::ActionError;

/// Future returned by a registered handler.
pub type ActionFuture = BoxFuture<'static, Result<Value, ActionError>>;

type Handler = Arc<dyn Fn(Value) -> ActionFuture + Send + Sync>;

/// Table of action handlers keyed by `role`/`cmd`.
///
/// Registering a second handler for the same pattern replaces the first.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: HashMap<ActionPattern, Handler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `pattern`.
    pub fn add<F, Fut>(&mut self, pattern: ActionPattern, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ActionError>> + Send + 'static,
    {
        debug!(pattern = %pattern, "Registering action handler");
        self.handlers
            .insert(pattern, Arc::new(move |args| handler(args).boxed()));
    }

    /// Whether a handler is registered for `pattern`.
    pub fn has(&self, pattern: &ActionPattern) -> bool {
        self.handlers.contains_key(pattern)
    }

    /// The registered patterns, in no particular order.
    pub fn patterns(&self) -> impl Iterator<Item = &ActionPattern> {
        self.handlers.keys()
    }

    /// Dispatch one action message.
    ///
    /// The message must be a JSON object with string `role` and `cmd` fields;
    /// the whole message is passed to the handler.
    pub async fn act(&self, message: Value) -> Result<Value, ActionError> {
        let pattern = Self::pattern_of(&message)?;

        let handler = self
            .handlers
            .get(&pattern)
            .cloned()
            .ok_or_else(|| ActionError::NoHandler(pattern.clone()))?;

        let result = handler(message).await;

        match &result {
            Ok(_) => debug!(pattern = %pattern, "Action completed"),
            Err(e) if e.is_misuse() => {
                error!(pattern = %pattern, error = %e, "Action rejected: caller misuse")
            }
            Err(e) => debug!(pattern = %pattern, error = %e, "Action failed"),
        }

        result
    }

    fn pattern_of(message: &Value) -> Result<ActionPattern, ActionError> {
        let field = |name: &str| {
            message
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    ActionError::invalid_message(format!("message has no string '{}' field", name))
                })
        };

        Ok(ActionPattern::new(field("role")?, field("cmd")?))
    }
}
