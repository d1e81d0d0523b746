//! # External SVGO Engine Module
//!
//! Questo modulo implementa l'engine di default delegando tutta
//! l'ottimizzazione a un eseguibile `svgo` esterno, per massimizzare la
//! compatibilità con l'ecosistema di plugin esistente.
//!
//! ## Architettura Zero-Dependency
//!
//! Nessun parsing SVG in-process: il contenuto viene materializzato in una
//! directory temporanea (sotto il nome originale del file, così i plugin
//! path-sensitive come `prefixIds` vedono il base name reale) e il processo
//! esterno scrive il risultato su stdout.
//!
//! ## Pipeline di invocazione
//!
//! 1. **Tempdir**: crea directory temporanea per input e config
//! 2. **Config**: serializza i settings opachi in un config file CommonJS
//!    (solo se non vuoti; settings vuoti = default dell'engine)
//! 3. **Spawn**: `svgo <input> -o - [--config <file>]` via `tokio::process`
//! 4. **Esito**: stdout → testo ottimizzato, stderr → messaggio d'errore
//!
//! ## Error handling
//!
//! - Eseguibile assente: `OptimizeError::MissingDependency`
//! - Exit status non-zero: `OptimizeError::Optimization` con stderr raw
//! - La schema validation dei settings appartiene all'engine stesso e
//!   riemerge come errore di invocazione

use crate::config::Settings;
use crate::error::OptimizeError;
use crate::optimizer::{OptimizeContext, Optimized, SvgOptimizer};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Default engine: an external `svgo` executable driven over the CLI
pub struct SvgoTool {
    settings: Settings,
    command: String,
}

impl SvgoTool {
    /// Create an engine bound to the given settings, resolving the
    /// platform-specific command name.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            command: Self::command_name().to_string(),
        }
    }

    /// Create an engine that invokes a custom executable (bundled tool,
    /// wrapper script) instead of the one on `PATH`.
    pub fn with_command(settings: Settings, command: impl Into<String>) -> Self {
        Self {
            settings,
            command: command.into(),
        }
    }

    /// Platform-specific command name for the engine executable
    pub fn command_name() -> &'static str {
        if cfg!(windows) {
            "svgo.cmd"
        } else {
            "svgo"
        }
    }

    /// Command used to check whether a program exists
    fn which_command() -> &'static str {
        if cfg!(windows) {
            "where"
        } else {
            "which"
        }
    }

    /// Check if the engine executable is available on the system.
    pub async fn is_available(&self) -> bool {
        let result = Command::new(Self::which_command())
            .arg(&self.command)
            .output()
            .await;

        match result {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    /// Fail early when the engine executable is missing.
    pub async fn check_dependencies(&self) -> Result<(), OptimizeError> {
        if self.is_available().await {
            Ok(())
        } else {
            Err(OptimizeError::MissingDependency(self.command.clone()))
        }
    }

    /// Render the opaque settings as a CommonJS config file for the engine.
    fn render_config(settings: &Settings) -> Result<String, OptimizeError> {
        let json = serde_json::to_string_pretty(settings.as_value())
            .map_err(|e| OptimizeError::Settings(e.to_string()))?;
        Ok(format!("module.exports = {};\n", json))
    }
}

#[async_trait]
impl SvgOptimizer for SvgoTool {
    async fn optimize(
        &self,
        source: &str,
        context: OptimizeContext<'_>,
    ) -> Result<Optimized, OptimizeError> {
        let workdir = tempfile::tempdir()?;

        // Keep the original base name so the engine sees it as context
        let file_name = context
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "input.svg".into());
        let input_path = workdir.path().join(file_name);
        tokio::fs::write(&input_path, source).await?;

        let mut cmd = Command::new(&self.command);
        cmd.arg(&input_path).arg("-o").arg("-");

        if !self.settings.is_empty() {
            let config_path = workdir.path().join("svgo.config.cjs");
            tokio::fs::write(&config_path, Self::render_config(&self.settings)?).await?;
            cmd.arg("--config").arg(&config_path);
        }

        debug!("Invoking {} for {}", self.command, context.path.display());

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OptimizeError::MissingDependency(self.command.clone())
            } else {
                OptimizeError::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("{} exited with {}", self.command, output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(OptimizeError::Optimization(message));
        }

        let data = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            "Optimized {}: {} -> {} bytes",
            context.path.display(),
            source.len(),
            data.len()
        );

        Ok(Optimized { data })
    }
}
