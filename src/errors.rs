use crate::policy::errors::PolicyError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CordonError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(cordon::io))]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(cordon::config))]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(cordon::serde))]
    Serde(#[from] serde_json::Error),

    #[error("Bad request: {0}")]
    #[diagnostic(code(cordon::bad_request))]
    BadRequest(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Policy(#[from] PolicyError),

    #[error("{0}")]
    #[diagnostic(code(cordon::other))]
    Other(String),
}
