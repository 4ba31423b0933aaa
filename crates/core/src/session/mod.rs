use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use crate::{
    animation::AnimationFrame,
    compose::{compose, SceneFrame},
    config::SceneConfig,
    interaction::{InteractionController, InteractionState},
    layout::SceneLayout,
    Result,
};

/// Readiness and mode, in the order a host shows them to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Loading,
    Ready,
    Exploring,
}

/// Booleans the host reads after every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSignals {
    pub is_exploring: bool,
    pub is_loaded: bool,
    /// Set only on the frame that first completed the scene.
    pub just_loaded: bool,
}

/// Everything that lives for one viewing session: the memoized layout, the
/// interaction machine and the load flag. Dropping it discards all of it.
#[derive(Debug)]
pub struct Session {
    config: SceneConfig,
    layout: OnceCell<SceneLayout>,
    interaction: InteractionController,
    loaded: bool,
}

impl Session {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            orbs = config.layout.orb_count,
            stars = config.layout.star_count,
            seed = ?config.layout.seed,
            "starting scene session"
        );
        Ok(Self {
            config,
            layout: OnceCell::new(),
            interaction: InteractionController::new(),
            loaded: false,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The session layout, generated on first access and reused afterwards.
    pub fn layout(&self) -> &SceneLayout {
        self.layout.get_or_init(|| {
            let layout = SceneLayout::generate(&self.config.layout);
            tracing::info!(objects = layout.object_count(), "generated scene layout");
            layout
        })
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn enter_exploration(&self) -> bool {
        self.interaction.enter_exploration()
    }

    /// Cloneable handle for delivering the "start exploring" event from
    /// another thread; the next [`Session::frame`] picks it up.
    pub fn interaction_handle(&self) -> InteractionController {
        self.interaction.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn status(&self) -> SessionStatus {
        match (self.loaded, self.interaction.state()) {
            (false, _) => SessionStatus::Loading,
            (true, InteractionState::Presentation) => SessionStatus::Ready,
            (true, InteractionState::Exploration) => SessionStatus::Exploring,
        }
    }

    /// Builds the frame for `elapsed` seconds into the session.
    ///
    /// Negative or non-finite times are treated as the session start.
    pub fn frame(&mut self, elapsed: f32) -> (SceneFrame, FrameSignals) {
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let state = self.interaction.state();
        let frame = compose(
            self.layout(),
            AnimationFrame::at(elapsed),
            state,
            &self.config,
        );

        let just_loaded = !self.loaded;
        if just_loaded {
            self.loaded = true;
            tracing::info!("scene ready");
        }
        tracing::debug!(elapsed, exploring = state.is_exploring(), "composed frame");

        let signals = FrameSignals {
            is_exploring: state.is_exploring(),
            is_loaded: self.loaded,
            just_loaded,
        };
        (frame, signals)
    }
}
