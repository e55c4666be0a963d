//! Scene core: the per-frame update/draw pipeline.
//!
//! # Invariants
//! - Exactly one camera is active; only the active camera advances.
//! - Draws are issued in roster order, each preceded by its own
//!   discard-write of the shared constant buffer.
//! - Meshes are shared through `Rc`; their tint is shared mutable state.
//! - Everything runs on one thread; nothing here is `Sync`.

pub mod animation;
pub mod camera;
pub mod entity;
pub mod mesh;
pub mod roster;
pub mod scene;
pub mod shapes;
pub mod ui;

pub use animation::{Phase, PingPong, Shuttle, Spin, Stride};
pub use camera::{Camera, CameraSettings};
pub use entity::Entity;
pub use mesh::Mesh;
pub use roster::{ShapeRecord, TransformEditor};
pub use scene::{CAMERA_COUNT, CLEAR_COLOR, FrameControl, Scene};
pub use ui::{DebugPanel, DebugUi, HeadlessUi, UiEdit};
