//! The backend-facing error type. Everything upstream of a backend (paint,
//! reconcile, elaboration) is infallible by design — malformed input yields
//! a neutral default rather than an error — so this is the first place a
//! `Result` appears in the pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no output sink connected")]
    NotConnected,
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
