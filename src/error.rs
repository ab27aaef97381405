use std::io;
use thiserror::Error;

/// Custom error type for the sysbar application
#[derive(Error, Debug)]
pub enum SysbarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GPU probe error: {0}")]
    Gpu(String),

    #[error("Metric collection failed: {0}")]
    Metric(String),

    #[error("Status host error: {0}")]
    Host(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the sysbar application
pub type Result<T> = std::result::Result<T, SysbarError>;

impl SysbarError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SysbarError::Config(msg.into())
    }

    /// Create a GPU probe error
    pub fn gpu<S: Into<String>>(msg: S) -> Self {
        SysbarError::Gpu(msg.into())
    }

    /// Create a metric collection error
    pub fn metric<S: Into<String>>(msg: S) -> Self {
        SysbarError::Metric(msg.into())
    }

    /// Create a status host error
    pub fn host<S: Into<String>>(msg: S) -> Self {
        SysbarError::Host(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SysbarError::Other(msg.into())
    }
}
