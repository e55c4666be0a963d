//! wgpu backend for the prism graphics context.
//!
//! Calls made through [`prism_render::GraphicsContext`] are recorded and
//! replayed into render passes at `present`, followed by the egui overlay.
//!
//! # Invariants
//! - Every constant write gets its own slot in the frame's constant ring,
//!   so a draw reads exactly the write issued before it.
//! - A lost or outdated surface skips the frame; it never ends the loop.

mod context;
mod overlay;
mod ring;
mod shaders;

pub use context::{WgpuContext, select_present_mode};
pub use overlay::EguiFrame;
