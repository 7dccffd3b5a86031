//! Error type shared by the node tree, the button renderer and the config
//! loader.

/// Everything that can go wrong while building or rendering markup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkupError {
    /// A child was attached to a node that cannot hold children.
    #[error("<{parent}> cannot have children")]
    InvalidChild { parent: String },

    /// A computation needs a style key that was not configured.
    #[error("style '{key}' is required but was not set")]
    MissingRequiredStyle { key: String },

    /// A style key is set but its value cannot be used.
    #[error("style '{key}' has unusable value '{value}'")]
    InvalidStyleValue { key: String, value: String },

    /// The email configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MarkupError {
    pub fn invalid_child(parent: impl Into<String>) -> Self {
        Self::InvalidChild {
            parent: parent.into(),
        }
    }

    pub fn missing_style(key: impl Into<String>) -> Self {
        Self::MissingRequiredStyle { key: key.into() }
    }

    pub fn invalid_style(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidStyleValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarkupError>;
