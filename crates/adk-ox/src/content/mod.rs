//! Conversation turns and their parts

pub mod part;

pub use part::{FunctionCall, FunctionResponse, Part};

use serde::{Deserialize, Serialize};

/// Represents the producer of a turn.
///
/// The framework only ever produces `user` and `model`, but turns are built by the
/// host and may carry anything; unrecognised roles are kept verbatim so converters
/// can decide what to do with them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Content produced by the user (including tool results).
    User,
    /// Content produced by the model.
    Model,
    /// Any other role string.
    #[serde(untagged)]
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Model => "model",
            Self::Other(role) => role,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One conversational turn: a role and its ordered parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Optional. A turn without a role is treated like an unknown role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Ordered parts that constitute the turn.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a new `Content` with the given role and parts.
    pub fn new(role: Role, parts: impl IntoIterator<Item = impl Into<Part>>) -> Self {
        Self {
            role: Some(role),
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn user(parts: impl IntoIterator<Item = impl Into<Part>>) -> Self {
        Self::new(Role::User, parts)
    }

    pub fn model(parts: impl IntoIterator<Item = impl Into<Part>>) -> Self {
        Self::new(Role::Model, parts)
    }

    /// A `user` turn holding a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::user([Part::text(text)])
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Text parts joined with `"\n"`, skipping every non-text part.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn function_calls(&self) -> impl Iterator<Item = &FunctionCall> + '_ {
        self.parts.iter().filter_map(Part::as_function_call)
    }
}
