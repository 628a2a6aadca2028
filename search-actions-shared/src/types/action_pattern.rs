//! Action pattern types.
//!
//! An action is addressed by a `role` and a `cmd`. The dispatch layer keys its
//! handler table on this pair.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role every search action is registered under.
pub const SEARCH_ROLE: &str = "search";

/// The `role`/`cmd` pair that identifies an action.
///
/// # Example
///
/// ```
/// use search_actions_shared::ActionPattern;
///
/// let pattern = ActionPattern::search("save");
/// assert_eq!(pattern.to_string(), "role:search,cmd:save");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionPattern {
    pub role: String,
    pub cmd: String,
}

impl ActionPattern {
    /// Create a pattern for an arbitrary role and command.
    pub fn new(role: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            cmd: cmd.into(),
        }
    }

    /// Create a pattern under the `search` role.
    pub fn search(cmd: impl Into<String>) -> Self {
        Self::new(SEARCH_ROLE, cmd)
    }
}

impl fmt::Display for ActionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role:{},cmd:{}", self.role, self.cmd)
    }
}
