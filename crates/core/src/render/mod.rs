use crate::{
    compose::SceneFrame,
    config::RenderConfig,
    session::{FrameSignals, Session},
    Result, SceneError,
};

/// Monotonic fixed-step session clock.
///
/// Time is derived from the step count rather than accumulated, so it never
/// drifts or stalls however long the view stays open.
#[derive(Debug, Clone)]
pub struct FrameClock {
    fps: u32,
    frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Result<Self> {
        if fps == 0 {
            return Err(SceneError::config("render fps must be positive"));
        }
        Ok(Self { fps, frames: 0 })
    }

    pub fn reset(&mut self) {
        self.frames = 0;
    }

    pub fn tick(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn time_seconds(&self) -> f64 {
        self.frames as f64 / self.fps as f64
    }

    /// Elapsed time at the precision the animation works in.
    pub fn elapsed(&self) -> f32 {
        self.time_seconds() as f32
    }
}

/// Host side of the loop: displays each composed frame.
pub trait FrameSink {
    fn present(&mut self, frame: &SceneFrame, signals: FrameSignals) -> Result<()>;
}

/// Fixed-step driver for hosts without their own display loop.
#[derive(Debug)]
pub struct RenderLoop {
    clock: FrameClock,
}

impl RenderLoop {
    pub fn new(fps: u32) -> Result<Self> {
        Ok(Self {
            clock: FrameClock::new(fps)?,
        })
    }

    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        Self::new(config.fps)
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn frames_presented(&self) -> u64 {
        self.clock.frames()
    }

    /// Presents the frame at the current time, then advances one step.
    pub fn tick<S: FrameSink>(
        &mut self,
        session: &mut Session,
        sink: &mut S,
    ) -> Result<FrameSignals> {
        let (frame, signals) = session.frame(self.clock.elapsed());
        sink.present(&frame, signals)?;
        self.clock.tick();
        Ok(signals)
    }

    /// Runs `frames` ticks. `before_frame` receives the frame number and the
    /// session so the host can inject UI events such as entering exploration.
    pub fn run<S, F>(
        &mut self,
        session: &mut Session,
        frames: u64,
        sink: &mut S,
        mut before_frame: F,
    ) -> Result<()>
    where
        S: FrameSink,
        F: FnMut(u64, &mut Session),
    {
        for number in 0..frames {
            before_frame(number, session);
            self.tick(session, sink)?;
        }
        tracing::debug!(
            frames = self.clock.frames(),
            elapsed = self.clock.time_seconds(),
            "render loop finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneConfig;

    #[derive(Default)]
    struct Collect {
        frames: Vec<(f32, FrameSignals, bool)>,
    }

    impl FrameSink for Collect {
        fn present(&mut self, frame: &SceneFrame, signals: FrameSignals) -> Result<()> {
            self.frames.push((frame.elapsed, signals, frame.overlay_visible));
            Ok(())
        }
    }

    struct Failing;

    impl FrameSink for Failing {
        fn present(&mut self, _: &SceneFrame, _: FrameSignals) -> Result<()> {
            Err(SceneError::msg("display lost"))
        }
    }

    #[test]
    fn clock_counts_fixed_steps() {
        let mut clock = FrameClock::new(4).unwrap();
        clock.tick();
        clock.tick();
        assert_eq!(clock.time_seconds(), 0.5);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn clock_does_not_drift_over_an_hour() {
        let mut clock = FrameClock::new(60).unwrap();
        for _ in 0..216_000 {
            clock.tick();
        }
        assert!((clock.time_seconds() - 3600.0).abs() < 1e-9);
        assert_eq!(clock.elapsed(), 3600.0);
    }

    #[test]
    fn clock_keeps_moving_after_a_week() {
        let mut clock = FrameClock::new(60).unwrap();
        clock.frames = 60 * 600_000;
        let before = clock.time_seconds();
        clock.tick();
        assert!(clock.time_seconds() > before);
        assert!((clock.time_seconds() - (600_000.0 + 1.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn rejects_zero_fps() {
        assert!(RenderLoop::new(0).is_err());
        assert!(FrameClock::new(0).is_err());
    }

    #[test]
    fn hour_long_loop_reports_exact_elapsed() {
        let mut session = Session::new(SceneConfig::default()).unwrap();
        let mut render = RenderLoop::new(60).unwrap();
        let mut sink = Collect::default();
        render.run(&mut session, 216_001, &mut sink, |_, _| {}).unwrap();

        let (last, _, _) = sink.frames[216_000];
        assert_eq!(last, 3600.0);
        assert_eq!(render.elapsed(), (216_001.0f64 / 60.0) as f32);
    }

    #[test]
    fn runs_fixed_steps_and_injects_events() {
        let mut session = Session::new(SceneConfig::default()).unwrap();
        let mut render = RenderLoop::new(10).unwrap();
        let mut sink = Collect::default();

        render
            .run(&mut session, 5, &mut sink, |n, s| {
                if n == 2 {
                    s.enter_exploration();
                }
            })
            .unwrap();

        assert_eq!(render.frames_presented(), 5);
        assert_eq!(sink.frames.len(), 5);
        assert!((sink.frames[3].0 - 0.3).abs() < 1e-5);
        assert!(sink.frames[0].1.just_loaded);
        assert!(sink.frames[1..].iter().all(|(_, s, _)| !s.just_loaded));

        let exploring: Vec<bool> = sink.frames.iter().map(|(_, s, _)| s.is_exploring).collect();
        assert_eq!(exploring, [false, false, true, true, true]);
        let overlay: Vec<bool> = sink.frames.iter().map(|(_, _, o)| *o).collect();
        assert_eq!(overlay, [true, true, false, false, false]);
    }

    #[test]
    fn sink_errors_stop_the_loop() {
        let mut session = Session::new(SceneConfig::default()).unwrap();
        let mut render = RenderLoop::new(60).unwrap();
        let err = render.run(&mut session, 3, &mut Failing, |_, _| {}).unwrap_err();
        assert!(format!("{err}").contains("display lost"));
        assert_eq!(render.frames_presented(), 0);
    }
}
