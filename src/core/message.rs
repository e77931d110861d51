//! Conversation messages tracked by a context window.

use crate::error::{CommandError, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions.
    System,
    /// End-user input.
    User,
    /// Model output.
    Assistant,
}

impl Role {
    /// Returns the lowercase role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(CommandError::InvalidArgument(format!("unknown role: {s}")).into()),
        }
    }
}

/// A message admitted to a context window.
///
/// Messages are created only by [`ContextWindow::add_message`] and are never
/// mutated afterwards.
///
/// [`ContextWindow::add_message`]: crate::context::ContextWindow::add_message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message text.
    pub content: String,

    /// Who wrote it.
    pub role: Role,

    /// Token cost charged against the window on admission.
    pub token_count: usize,

    /// Unix timestamp (seconds) of admission.
    pub timestamp: i64,
}

impl Message {
    pub(crate) fn new(content: String, role: Role, token_count: usize) -> Self {
        Self {
            content,
            role,
            token_count,
            timestamp: current_timestamp(),
        }
    }
}

/// Returns the current Unix timestamp in seconds.
#[allow(clippy::cast_possible_wrap)]
fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
