//! # Pipeline File Module
//!
//! Questo modulo definisce l'unità che attraversa la pipeline.
//!
//! ## Responsabilità:
//! - Definisce `PipelineFile` (path + contenuto) e `Contents` (buffer vs stream)
//! - Determinazione formato file (estensione SVG, case-insensitive)
//! - Calcolo path relativo alla working directory per le diagnostiche
//!
//! ## Rappresentazioni del contenuto:
//! - **Buffer**: byte completamente materializzati in memoria
//! - **Stream**: sorgente `AsyncRead` aperta, non supportata dall'adapter
//!
//! Le due rappresentazioni sono mutuamente esclusive per costruzione (enum).
//! L'adapter muta il contenuto in place e inoltra lo stesso file: non crea
//! né distrugge mai file.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

/// File contents: either fully buffered bytes or an open streaming source.
pub enum Contents {
    /// Fully materialized in-memory bytes
    Buffer(Vec<u8>),
    /// An open async byte source; the adapter passes these through untouched
    Stream(Box<dyn AsyncRead + Send + Unpin>),
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contents::Buffer(bytes) => f.debug_tuple("Buffer").field(&bytes.len()).finish(),
            Contents::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// One unit flowing through the pipeline
#[derive(Debug)]
pub struct PipelineFile {
    path: PathBuf,
    contents: Contents,
}

impl PipelineFile {
    /// Create a file with fully buffered contents.
    pub fn buffered(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: Contents::Buffer(bytes.into()),
        }
    }

    /// Create a file backed by a streaming source.
    pub fn streamed(path: impl Into<PathBuf>, source: Box<dyn AsyncRead + Send + Unpin>) -> Self {
        Self {
            path: path.into(),
            contents: Contents::Stream(source),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self.contents, Contents::Buffer(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.contents, Contents::Stream(_))
    }

    /// Check whether the path carries an `.svg` extension (case-insensitive)
    pub fn is_svg(&self) -> bool {
        if let Some(ext) = self.path.extension() {
            ext.to_string_lossy().to_lowercase() == "svg"
        } else {
            false
        }
    }

    /// Buffered contents decoded as UTF-8 text; `None` for streams.
    ///
    /// Decoding is lossy: optimization input is text by contract, and the
    /// engine is the one that rejects markup it cannot parse.
    pub fn text_lossy(&self) -> Option<Cow<'_, str>> {
        match &self.contents {
            Contents::Buffer(bytes) => Some(String::from_utf8_lossy(bytes)),
            Contents::Stream(_) => None,
        }
    }

    /// Replace buffered contents in place, preserving path and identity.
    pub fn set_contents(&mut self, bytes: Vec<u8>) {
        self.contents = Contents::Buffer(bytes);
    }

    /// Path relative to the current working directory, for diagnostics.
    /// Falls back to the original path when it is not under the cwd.
    pub fn relative_path(&self) -> PathBuf {
        match std::env::current_dir() {
            Ok(cwd) => self
                .path
                .strip_prefix(&cwd)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| self.path.clone()),
            Err(_) => self.path.clone(),
        }
    }
}
