//! Error types for building and navigating a table of contents

use thiserror::Error;

/// Errors raised while rendering the widget or navigating to a heading
#[derive(Error, Debug)]
pub enum TocError {
    /// The configured `src` selector matched no element
    #[error("Source container not found: selector \"{selector}\" matched no element")]
    SourceNotFound {
        /// The selector that was attempted
        selector: String,
    },

    /// The configured `src` selector could not be parsed
    #[error("Invalid selector \"{selector}\"")]
    InvalidSelector {
        /// The selector text as configured
        selector: String,
    },

    /// A `levels` token does not name a heading tag (H1-H6 or 1-6)
    #[error("Invalid heading level \"{token}\" (expected H1-H6 or 1-6)")]
    InvalidLevel {
        /// The offending token after normalization
        token: String,
    },

    /// A navigation target id did not resolve to an element
    #[error("Scroll target not found: no element with id \"{id}\"")]
    TargetNotFound {
        /// The id that was looked up
        id: String,
    },

    #[error("IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl TocError {
    /// Whether this is a configuration error (fatal for the current render)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::InvalidSelector { .. } | Self::InvalidLevel { .. }
        )
    }
}
