use crate::context::{BufferHandle, BufferKind};

/// Failures reported by a graphics context.
///
/// None of these are retried. Creation errors abort scene setup; surface and
/// present errors end the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create {kind:?} buffer: {reason}")]
    BufferCreation { kind: BufferKind, reason: String },
    #[error("refusing to create an empty {0:?} buffer")]
    EmptyBuffer(BufferKind),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("unknown buffer handle {0:?}")]
    UnknownBuffer(BufferHandle),
    #[error("buffer {handle:?} is a {actual:?} buffer, expected {expected:?}")]
    WrongBufferKind {
        handle: BufferHandle,
        expected: BufferKind,
        actual: BufferKind,
    },
    #[error("payload of {len} bytes exceeds constant buffer of {capacity} bytes")]
    PayloadTooLarge { len: usize, capacity: usize },
    #[error("surface error: {0}")]
    Surface(String),
    #[error("present failed: {0}")]
    Present(String),
    #[error("no suitable graphics adapter")]
    Adapter,
    #[error("device request failed: {0}")]
    Device(String),
}
