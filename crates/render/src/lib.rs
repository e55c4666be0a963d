//! Rendering Adapter: the graphics-device interface the scene draws through.
//!
//! # Invariants
//! - Geometry buffers are immutable once created.
//! - Constant buffers are discard-written: each write invalidates the
//!   previous contents, so a draw only ever sees the write issued right
//!   before it.
//! - Commands execute in issue order on a single stream.
//!
//! The trait is implemented by the wgpu backend for the desktop app and by
//! [`RecordingContext`], which validates and logs every call without a GPU.

mod context;
mod error;
mod recording;
mod types;

pub use context::{BufferHandle, BufferKind, GraphicsContext};
pub use error::RenderError;
pub use recording::{Command, DrawSnapshot, RecordingContext};
pub use types::{ObjectConstants, Vertex, constant_buffer_size};

pub fn crate_info() -> &'static str {
    concat!("prism-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
