//! # SVGO Stream Adapter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dello stage di pipeline
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per le pipeline host
//!
//! ## Architettura dei moduli:
//! - `config`: Settings opachi per l'engine e failure policy dello stage
//! - `error`: Tipi di errore custom (engine + pipeline strutturato)
//! - `file`: Unità di pipeline (path + contenuto buffer/stream)
//! - `optimizer`: Confine trait verso l'engine di ottimizzazione SVG
//! - `svgo_tool`: Engine di default via eseguibile `svgo` esterno
//! - `diagnostic`: Traduzione errore → diagnostica e side channel
//! - `transform`: Lo stage di trasformazione vero e proprio
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use svgo_stream::{SvgTransform, TransformConfig, PipelineFile};
//!
//! let stage = Arc::new(SvgTransform::new(TransformConfig::default()));
//! let file = PipelineFile::buffered("icon.svg", svg_bytes);
//! match stage.process(file).await? {
//!     Some(file) => emit(file),
//!     None => {} // dropped, diagnostic already on the side channel
//! }
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod file;
pub mod optimizer;
pub mod svgo_tool;
pub mod transform;

pub use config::{ErrorPolicy, Settings, TransformConfig};
pub use diagnostic::{Diagnostic, DiagnosticSink, MemorySink, StderrSink};
pub use error::{OptimizeError, StageError};
pub use file::{Contents, PipelineFile};
pub use optimizer::{Optimized, OptimizeContext, SvgOptimizer};
pub use svgo_tool::SvgoTool;
pub use transform::{SvgTransform, STAGE_NAME};
