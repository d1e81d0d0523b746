//! End-to-end tests for the transform stage plugged into a stream of files.

use async_trait::async_trait;
use futures::StreamExt;
use std::path::Path;
use std::sync::Arc;

use svgo_stream::{
    Contents, DiagnosticSink, ErrorPolicy, MemorySink, OptimizeContext, OptimizeError, Optimized,
    PipelineFile, SvgOptimizer, SvgTransform,
};

const SRC: &str = "<svg viewBox=\"0 0 42 42\" xmlns=\"http://www.w3.org/2000/svg\">\
                   <rect id=\"some-id\" x=\"0\" y=\"0\" width=\"42\" height=\"42\"/></svg>";
const MINIFIED: &str =
    "<svg viewBox=\"0 0 42 42\" xmlns=\"http://www.w3.org/2000/svg\"><path d=\"M0 0h42v42H0z\"/></svg>";
const MALFORMED: &str = "<svg viewBox=\"0 0 42 42\"><rect/>";
const PARSE_ERROR: &str = "Error in parsing SVG: Unclosed root tag\nLine: 0\nColumn: 34\nChar: ";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Scripted engine: minifies well-formed sources, rejects unclosed markup.
struct ScriptedEngine;

#[async_trait]
impl SvgOptimizer for ScriptedEngine {
    async fn optimize(
        &self,
        source: &str,
        _context: OptimizeContext<'_>,
    ) -> Result<Optimized, OptimizeError> {
        if source.contains("</svg>") {
            Ok(Optimized { data: MINIFIED.to_string() })
        } else {
            Err(OptimizeError::Optimization(PARSE_ERROR.to_string()))
        }
    }
}

fn mixed_input() -> futures::stream::Iter<std::vec::IntoIter<PipelineFile>> {
    futures::stream::iter(vec![
        PipelineFile::buffered("photo.jpg", b"jpeg bytes".to_vec()),
        PipelineFile::buffered("icon.svg", SRC.as_bytes().to_vec()),
        PipelineFile::buffered("empty.svg", Vec::new()),
        PipelineFile::streamed("streamed.svg", Box::new(tokio::io::empty())),
        PipelineFile::buffered("malformed.svg", MALFORMED.as_bytes().to_vec()),
        PipelineFile::buffered("notes.txt", b"plain text".to_vec()),
    ])
}

#[tokio::test]
async fn warn_policy_stage_over_mixed_stream() {
    init_tracing();

    let sink = Arc::new(MemorySink::new());
    let stage = Arc::new(
        SvgTransform::with_optimizer(ErrorPolicy::Warn, Arc::new(ScriptedEngine))
            .with_sink(sink.clone() as Arc<dyn DiagnosticSink>),
    );

    let emitted: Vec<PipelineFile> = stage
        .pipe(mixed_input())
        .map(|outcome| outcome.expect("warn policy never errors"))
        .collect()
        .await;

    // The malformed file was dropped; everything else came out in order
    let paths: Vec<&Path> = emitted.iter().map(PipelineFile::path).collect();
    assert_eq!(
        paths,
        vec![
            Path::new("photo.jpg"),
            Path::new("icon.svg"),
            Path::new("empty.svg"),
            Path::new("streamed.svg"),
            Path::new("notes.txt"),
        ]
    );

    // Pass-throughs are untouched, the SVG was rewritten in place
    assert_eq!(emitted[0].text_lossy().unwrap(), "jpeg bytes");
    assert_eq!(emitted[1].text_lossy().unwrap(), MINIFIED);
    assert_eq!(emitted[2].text_lossy().unwrap(), "");
    assert!(matches!(emitted[3].contents(), Contents::Stream(_)));
    assert_eq!(emitted[4].text_lossy().unwrap(), "plain text");

    // Exactly one consolidated diagnostic for the malformed file
    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("File: malformed.svg"));
    assert!(lines[0].contains("Unclosed root tag"));
    assert!(lines[0].contains("\n\tLine: 0"));
    assert!(lines[0].contains("\n\tColumn: 34"));
}

#[tokio::test]
async fn fail_policy_stage_surfaces_structured_error() {
    init_tracing();

    let stage = Arc::new(SvgTransform::with_optimizer(
        ErrorPolicy::Fail,
        Arc::new(ScriptedEngine),
    ));

    let outcomes: Vec<_> = stage.pipe(mixed_input()).collect().await;

    // Same emissions, except the malformed file surfaces as an error item
    assert_eq!(outcomes.len(), 6);
    assert!(outcomes[..4].iter().all(|o| o.is_ok()));
    assert!(outcomes[5].is_ok());

    let error = outcomes[4].as_ref().unwrap_err();
    assert_eq!(error.plugin_name, svgo_stream::STAGE_NAME);
    assert!(error.message.contains("File: malformed.svg"));
    assert!(error.message.contains("Unclosed root tag"));
}

#[tokio::test]
async fn repeated_pass_through_is_stable() {
    init_tracing();

    let stage = SvgTransform::with_optimizer(ErrorPolicy::Warn, Arc::new(ScriptedEngine));

    let once = stage
        .process(PipelineFile::buffered("photo.jpg", b"jpeg bytes".to_vec()))
        .await
        .unwrap()
        .unwrap();
    let twice = stage.process(once).await.unwrap().unwrap();

    assert_eq!(twice.text_lossy().unwrap(), "jpeg bytes");
    assert_eq!(twice.path(), Path::new("photo.jpg"));
}
