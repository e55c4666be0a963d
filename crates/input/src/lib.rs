//! Input: OS events accumulated between frames, handed to the scene as an
//! explicit per-frame snapshot.
//!
//! # Invariants
//! - A key press edge is reported once per physical press, never on auto-repeat.
//! - While the debug UI captures a device, queries against it report nothing.

pub mod key;
pub mod state;

pub use key::{Key, MouseButton};
pub use state::{FrameInput, InputState};
