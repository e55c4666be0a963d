//! Shared types for the prism rendering demo.
//!
//! # Invariants
//! - World matrix composes scale, then rotation, then translation.
//! - Left-handed axes: forward is `+Z`, right is `+X`, up is `+Y`.

pub mod transform;

pub use transform::{Transform, TransformSnapshot};
