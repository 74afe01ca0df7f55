//! Error types for language-resource operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LangError {
    /// Malformed locale tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Underlying document error
    #[error(transparent)]
    Config(#[from] hearth_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, LangError>;
