//! Core library for the Hero Scene viewport.
//!
//! The crate computes a small decorative 3D scene (floating orbs, a pulsing
//! heart, tilting star cones and a background starfield) without touching
//! any rendering surface. Each module owns one concern: procedural layout,
//! time-driven animation, the presentation/exploration state machine, camera
//! controls and the per-frame composition a host renders.

pub mod animation;
pub mod camera;
pub mod compose;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod lighting;
pub mod render;
pub mod session;
pub mod starfield;

pub use animation::{AnimationFrame, FloatDelta, GroupAnimation, GroupDelta};
pub use camera::{CameraControlConfig, CameraSetup, OrbitCamera, TouchAction, TouchMapping};
pub use compose::{compose, GroupFrame, ObjectFrame, SceneFrame};
pub use config::{CameraConfig, LayoutConfig, RenderConfig, SceneConfig};
pub use error::{Result, SceneError};
pub use interaction::{InteractionController, InteractionState};
pub use layout::{
    DecorativeObject, GroupKind, HeartMesh, ObjectGroup, RotationSource, Rgb, SceneLayout,
};
pub use lighting::{Light, LightKind, LightingRig};
pub use render::{FrameClock, FrameSink, RenderLoop};
pub use session::{FrameSignals, Session, SessionStatus};
pub use starfield::{StarPoint, Starfield, StarfieldParams};
