//! # Diagnostic Module
//!
//! Traduzione errore-engine → diagnostica di pipeline.
//!
//! ## Responsabilità:
//! - Combina path del file (relativo alla cwd) e messaggio raw dell'engine
//! - Riscrive il prefisso `Line:` inserendo `File: <path>` sulla riga prima
//! - Re-indenta ogni newline con un tab e trimma il risultato
//! - Definisce il side channel iniettabile (`DiagnosticSink`, default stderr)

use std::path::{Path, PathBuf};

const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Adapter-formatted error value: file path plus engine message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    path: PathBuf,
    message: String,
}

impl Diagnostic {
    /// Build a diagnostic from a cwd-relative file path and the engine's
    /// raw error message.
    pub fn new(relative_path: impl Into<PathBuf>, raw_message: &str) -> Self {
        let path = relative_path.into();
        let message = Self::rewrite(&path, raw_message);
        Self { path, message }
    }

    fn rewrite(path: &Path, raw: &str) -> String {
        let with_file = raw.replacen("Line:", &format!("File: {}\nLine:", path.display()), 1);
        with_file.replace('\n', "\n\t").trim().to_string()
    }

    /// The consolidated message (path context spliced in, tab-indented).
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The colored single-line form written to the side channel.
    pub fn render(&self, stage: &str) -> String {
        format!("{YELLOW}{stage}:{RED} {}{RESET}", self.message)
    }
}

/// Where non-fatal diagnostics go. Injectable so the stage stays testable
/// without touching process-global output.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Default sink: the process error stream
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// Capturing sink for tests and embedding hosts
#[derive(Default)]
pub struct MemorySink {
    lines: std::sync::Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink poisoned").clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.lock().expect("sink poisoned").push(line.to_string());
    }
}
