//! # Transform Stage Module
//!
//! Questo è il modulo principale che orchestra il processing per-file.
//!
//! ## Responsabilità:
//! - Costruzione dello stage (un solo engine per stage, condiviso tra i file)
//! - Gate di tipo/contenuto: solo file `.svg` bufferizzati e non vuoti
//! - Dispatch asincrono verso l'engine e ri-emissione del file trasformato
//! - Traduzione dei fallimenti in diagnostiche secondo la failure policy
//! - Adattatore `pipe` per inserire lo stage in una catena di `Stream`
//!
//! ## Flusso per file:
//! 1. Estensione non `.svg` (case-insensitive) → pass-through invariato
//! 2. Contenuto streaming → pass-through invariato (non supportato)
//! 3. Buffer vuoto come testo → pass-through invariato
//! 4. Buffer pieno → decode UTF-8, `optimize(text, {path})` await
//!    - Successo: contenuto sostituito in place, file ri-emesso
//!    - Fallimento: diagnostica; `Warn` → side channel + file scartato,
//!      `Fail` → `StageError` strutturato verso la pipeline
//!
//! ## Gestione concorrenza:
//! - Un solo punto di sospensione: l'invocazione dell'engine
//! - Nessun bound imposto sui file in-flight: il backpressure è del host
//! - Nessun retry, nessuna emissione parziale: esattamente un esito per file
//! - Cancellazione fire-and-forget: un future droppato resta inerte
//!
//! ## Esempio:
//! ```rust,ignore
//! let stage = Arc::new(SvgTransform::new(TransformConfig::default()));
//! let output = stage.pipe(input_stream);
//! ```

use crate::config::{ErrorPolicy, TransformConfig};
use crate::diagnostic::{Diagnostic, DiagnosticSink, StderrSink};
use crate::error::StageError;
use crate::file::{Contents, PipelineFile};
use crate::optimizer::{OptimizeContext, SvgOptimizer};
use crate::svgo_tool::SvgoTool;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stage name used in diagnostics and structured errors
pub const STAGE_NAME: &str = "svgo-stream";

/// The transform stage: filters SVG files to the optimizer and translates
/// its failures into pipeline diagnostics.
pub struct SvgTransform {
    optimizer: Arc<dyn SvgOptimizer>,
    on_error: ErrorPolicy,
    sink: Arc<dyn DiagnosticSink>,
}

impl SvgTransform {
    /// Build a stage around the default external engine. The engine is
    /// constructed exactly once, bound to `config.settings`, and reused for
    /// every file this stage processes. Settings are not validated here;
    /// the engine rejects bad ones at invocation time.
    pub fn new(config: TransformConfig) -> Self {
        let on_error = config.on_error;
        Self::with_optimizer(on_error, Arc::new(SvgoTool::new(config.settings)))
    }

    /// Build a stage around an injected engine.
    pub fn with_optimizer(on_error: ErrorPolicy, optimizer: Arc<dyn SvgOptimizer>) -> Self {
        Self {
            optimizer,
            on_error,
            sink: Arc::new(StderrSink),
        }
    }

    /// Replace the diagnostic side channel (default: stderr).
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Process one file. Exactly one outcome per input:
    ///
    /// - `Ok(Some(file))` — pass-through (not applicable) or transformed
    /// - `Ok(None)` — engine failure under [`ErrorPolicy::Warn`]: the
    ///   diagnostic went to the side channel and the file is dropped
    /// - `Err(StageError)` — engine failure under [`ErrorPolicy::Fail`]
    pub async fn process(&self, mut file: PipelineFile) -> Result<Option<PipelineFile>, StageError> {
        if !file.is_svg() {
            debug!("Not an SVG, passing through: {}", file.path().display());
            return Ok(Some(file));
        }

        let text = match file.contents() {
            // Streamed SVG content is not supported; no optimization attempt
            Contents::Stream(_) => {
                debug!("Streamed contents, passing through: {}", file.path().display());
                return Ok(Some(file));
            }
            Contents::Buffer(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        };

        if text.is_empty() {
            debug!("Empty contents, passing through: {}", file.path().display());
            return Ok(Some(file));
        }

        let context = OptimizeContext { path: file.path() };
        match self.optimizer.optimize(&text, context).await {
            Ok(optimized) => {
                debug!(
                    "Optimized {}: {} -> {} bytes",
                    file.path().display(),
                    text.len(),
                    optimized.data.len()
                );
                file.set_contents(optimized.data.into_bytes());
                Ok(Some(file))
            }
            Err(error) => {
                let diagnostic = Diagnostic::new(file.relative_path(), &error.message());
                warn!("Optimization failed for {}", file.path().display());

                match self.on_error {
                    ErrorPolicy::Warn => {
                        self.sink.emit(&diagnostic.render(STAGE_NAME));
                        Ok(None)
                    }
                    ErrorPolicy::Fail => {
                        Err(StageError::new(STAGE_NAME, diagnostic.message()))
                    }
                }
            }
        }
    }

    /// Plug the stage into a chain: adapt a stream of files into a stream of
    /// per-file outcomes. Files are processed in submission order; dropped
    /// (warned) files simply do not appear in the output.
    pub fn pipe<S>(self: Arc<Self>, input: S) -> impl Stream<Item = Result<PipelineFile, StageError>>
    where
        S: Stream<Item = PipelineFile>,
    {
        input
            .then(move |file| {
                let stage = Arc::clone(&self);
                async move { stage.process(file).await }
            })
            .filter_map(|outcome| async move { outcome.transpose() })
    }
}
