//! Error types for tfdemo-rs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tfdemo-rs operations.
pub type Result<T> = std::result::Result<T, TfDemoError>;

/// Errors that can occur while loading or running a graph.
#[derive(Debug, Error)]
pub enum TfDemoError {
    /// Graph loading failed.
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    /// Graph execution failed.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// A fed or fetched tensor does not match what the graph expects.
    #[error("Invalid tensor: {0}")]
    Tensor(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

impl TfDemoError {
    /// Create a model load error.
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create an inference error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a tensor error.
    pub fn tensor(msg: impl Into<String>) -> Self {
        Self::Tensor(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors raised while constructing a model.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::ModelLoad(_) | Self::FileNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TfDemoError::model_load("bad graph");
        assert_eq!(format!("{}", err), "Model loading failed: bad graph");

        let err = TfDemoError::tensor("expected 2 elements, got 3");
        assert_eq!(
            format!("{}", err),
            "Invalid tensor: expected 2 elements, got 3"
        );

        let err = TfDemoError::FileNotFound(PathBuf::from("/assets/doubler.pb"));
        assert_eq!(format!("{}", err), "File not found: /assets/doubler.pb");
    }

    #[test]
    fn test_load_failure_classification() {
        assert!(TfDemoError::model_load("x").is_load_failure());
        assert!(TfDemoError::FileNotFound(PathBuf::from("x")).is_load_failure());
        assert!(!TfDemoError::inference("x").is_load_failure());
        assert!(!TfDemoError::tensor("x").is_load_failure());
    }
}
