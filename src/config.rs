//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'adapter.
//!
//! ## Responsabilità:
//! - Definisce `Settings`: configurazione opaca passata all'engine esterno
//! - Definisce `ErrorPolicy`: come propagare i fallimenti dell'engine
//! - Definisce `TransformConfig`: configurazione completa dello stage
//! - Supporta caricamento/salvataggio settings da/verso file JSON
//!
//! ## Parametri di configurazione:
//! - `settings`: oggetto JSON opaco (flag top-level + array ordinato `plugins`
//!   di toggle directives), mai interpretato dall'adapter
//! - `on_error`: `Warn` (default, diagnostica su side channel e file scartato)
//!   oppure `Fail` (errore strutturato per-file verso la pipeline)
//!
//! ## Validazione:
//! - Nessuna validazione dei settings in fase di costruzione: la schema
//!   validation appartiene all'engine e avviene alla prima invocazione
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = TransformConfig {
//!     settings: Settings::from_value(serde_json::json!({
//!         "plugins": [{ "removeDoctype": false }]
//!     })),
//!     on_error: ErrorPolicy::Fail,
//! };
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Opaque optimizer settings, passed through to the engine unmodified.
///
/// Holds a JSON object whose shape follows the engine's own configuration
/// schema: top-level flags plus an ordered `plugins` array of named toggle
/// directives. The adapter never looks inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Value);

impl Default for Settings {
    fn default() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }
}

impl Settings {
    /// Wrap an already-built JSON value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The underlying JSON value, for handing to the engine.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// True when no options were supplied (engine defaults apply).
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Load settings from a JSON file, falling back to defaults when the
    /// file does not exist.
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a JSON file.
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.0)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

/// How an engine failure is surfaced to the host pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Print a colored diagnostic to the side channel and drop the file;
    /// the pipeline continues. This is the default.
    #[default]
    Warn,
    /// Return a structured [`StageError`](crate::error::StageError) for the
    /// file; the host pipeline decides whether to halt.
    Fail,
}

/// Configuration for one transform stage
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransformConfig {
    /// Opaque engine settings (immutable once the stage is built)
    #[serde(default)]
    pub settings: Settings,
    /// Failure policy for engine rejections
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

impl TransformConfig {
    /// Config with the given settings and the default failure policy.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            on_error: ErrorPolicy::default(),
        }
    }
}
