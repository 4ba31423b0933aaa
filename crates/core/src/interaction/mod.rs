use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use serde::{Deserialize, Serialize};

/// Whether the viewer is looking at the overlay or driving the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionState {
    #[default]
    Presentation,
    Exploration,
}

impl InteractionState {
    pub fn is_exploring(self) -> bool {
        self == InteractionState::Exploration
    }

    pub fn controls_enabled(self) -> bool {
        self.is_exploring()
    }

    pub fn auto_rotate(self) -> bool {
        self.is_exploring()
    }

    pub fn show_overlay(self) -> bool {
        self == InteractionState::Presentation
    }
}

/// One-way Presentation → Exploration machine for a single session.
///
/// Clones share one atomic flag, so a UI thread can hold a clone and raise it
/// while the render thread reads the state for the next frame. The flag can
/// only ever be raised.
#[derive(Debug, Default, Clone)]
pub struct InteractionController {
    exploring: Arc<AtomicBool>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        if self.exploring.load(Ordering::Acquire) {
            InteractionState::Exploration
        } else {
            InteractionState::Presentation
        }
    }

    /// Handles the host's "start exploring" event. Returns `true` only for the
    /// event that performed the transition.
    pub fn enter_exploration(&self) -> bool {
        let was_exploring = self.exploring.swap(true, Ordering::AcqRel);
        if !was_exploring {
            tracing::info!("entering exploration mode");
        }
        !was_exploring
    }
}
