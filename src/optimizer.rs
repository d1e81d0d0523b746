//! # Optimizer Boundary Module
//!
//! Confine verso l'engine di ottimizzazione SVG, opaco per l'adapter.
//! L'implementazione di produzione è [`SvgoTool`](crate::svgo_tool::SvgoTool);
//! i test usano engine scriptati.

use crate::error::OptimizeError;
use async_trait::async_trait;
use std::path::Path;

/// Per-invocation context handed to the engine alongside the source text.
#[derive(Debug, Clone, Copy)]
pub struct OptimizeContext<'a> {
    /// Path of the file being optimized; path-sensitive plugins (e.g. id
    /// prefixing) derive names from it
    pub path: &'a Path,
}

/// Successful optimization result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimized {
    /// The optimized SVG text
    pub data: String,
}

/// An SVG optimization engine.
///
/// One instance is built per adapter and shared across every file that
/// adapter processes, possibly concurrently; implementations must therefore
/// be safe for shared read-only use.
#[async_trait]
pub trait SvgOptimizer: Send + Sync {
    /// Optimize one SVG document.
    ///
    /// On failure the error's message may span multiple newline-separated
    /// diagnostic lines ("Error in parsing SVG: ...", "Line:", "Column:",
    /// "Char:"); the adapter folds it into a [`Diagnostic`] verbatim.
    ///
    /// [`Diagnostic`]: crate::diagnostic::Diagnostic
    async fn optimize(
        &self,
        source: &str,
        context: OptimizeContext<'_>,
    ) -> Result<Optimized, OptimizeError>;
}
