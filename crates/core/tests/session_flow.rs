use hero_scene_core::{
    FrameSignals, FrameSink, GroupKind, InteractionState, LayoutConfig, RenderLoop, Result,
    SceneConfig, SceneFrame, Session, SessionStatus,
};

#[derive(Default)]
struct Recorder {
    frames: Vec<SceneFrame>,
    signals: Vec<FrameSignals>,
}

impl FrameSink for Recorder {
    fn present(&mut self, frame: &SceneFrame, signals: FrameSignals) -> Result<()> {
        self.frames.push(frame.clone());
        self.signals.push(signals);
        Ok(())
    }
}

#[test]
fn presentation_to_exploration_lifecycle() {
    let mut session = Session::new(SceneConfig::default()).unwrap();
    let mut render = RenderLoop::new(60).unwrap();
    let mut recorder = Recorder::default();

    render
        .run(&mut session, 120, &mut recorder, |n, s| {
            if n >= 60 {
                // Repeated clicks after the first are ignored.
                s.enter_exploration();
            }
        })
        .unwrap();

    assert_eq!(session.status(), SessionStatus::Exploring);
    assert_eq!(session.interaction(), InteractionState::Exploration);
    assert_eq!(recorder.signals.iter().filter(|s| s.just_loaded).count(), 1);

    let (presenting, exploring) = recorder.frames.split_at(60);
    assert!(presenting.iter().all(|f| f.overlay_visible && !f.controls.enabled));
    assert!(exploring.iter().all(|f| !f.overlay_visible && f.controls.auto_rotate));
}

#[test]
fn seeded_sessions_render_identical_frames() {
    let config = SceneConfig {
        layout: LayoutConfig {
            seed: Some(99),
            ..LayoutConfig::default()
        },
        ..SceneConfig::default()
    };

    let mut a = Session::new(config.clone()).unwrap();
    let mut b = Session::new(config).unwrap();
    for t in [0.0, 1.5, 10.0] {
        assert_eq!(a.frame(t).0, b.frame(t).0);
    }
    assert_eq!(a.layout(), b.layout());
}

#[test]
fn frames_serialise_for_the_host() {
    let mut session = Session::new(SceneConfig::default()).unwrap();
    let (frame, _) = session.frame(2.0);
    let json = serde_json::to_value(&frame).unwrap();

    assert_eq!(json["overlay_visible"], true);
    assert_eq!(json["groups"].as_array().unwrap().len(), 3);
    assert_eq!(json["controls"]["touches"]["two_finger"], "DollyPan");

    let orbs = frame.group(GroupKind::Orbs).unwrap();
    assert_eq!(orbs.objects.len(), 15);
}
