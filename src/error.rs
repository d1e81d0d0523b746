//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'adapter.
//!
//! ## Responsabilità:
//! - Definisce `OptimizeError` enum per categorizzare gli errori dell'engine
//! - Definisce `StageError` per la failure policy strutturata della pipeline
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (tempfile, spawn del processo esterno, etc.)
//! - `Optimization`: L'engine ha rifiutato il contenuto SVG (markup malformato)
//! - `MissingDependency`: Eseguibile `svgo` non trovato nel sistema
//! - `Settings`: Settings non serializzabili verso il config file dell'engine

use std::fmt;

/// Custom error types for the optimizer boundary
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Optimization(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl OptimizeError {
    /// The raw engine message, as it should appear inside a diagnostic.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Structured per-file pipeline error, produced under [`ErrorPolicy::Fail`].
///
/// Carries the stage name and the consolidated diagnostic message. `Display`
/// prints the message only: there is no stack trace or property dump for the
/// host pipeline to render.
///
/// [`ErrorPolicy::Fail`]: crate::config::ErrorPolicy::Fail
#[derive(Debug)]
pub struct StageError {
    /// Name of the pipeline stage that produced the error
    pub plugin_name: &'static str,
    /// Consolidated diagnostic message (file path + engine error text)
    pub message: String,
}

impl StageError {
    pub fn new(plugin_name: &'static str, message: impl Into<String>) -> Self {
        Self {
            plugin_name,
            message: message.into(),
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_error_message_is_raw() {
        let err = OptimizeError::Optimization("Error in parsing SVG: Unclosed root tag".to_string());
        assert_eq!(err.message(), "Error in parsing SVG: Unclosed root tag");
    }

    #[test]
    fn test_stage_error_display_is_message_only() {
        let err = StageError::new("svgo-stream", "File: a.svg\n\tLine: 0");
        assert_eq!(err.to_string(), "File: a.svg\n\tLine: 0");
        assert_eq!(err.plugin_name, "svgo-stream");
    }
}
