//! Time-driven motion of the object groups.
//!
//! Everything here is a pure function of elapsed time: evaluating the same
//! frame twice yields the same deltas, so nothing drifts between frames.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::layout::{DecorativeObject, GroupKind, ObjectGroup};

pub const HEART_PULSE_RATE: f32 = 2.0;
pub const HEART_PULSE_AMPLITUDE: f32 = 0.1;
pub const STAR_TILT_RATE: f32 = 0.3;
pub const STAR_TILT_AMPLITUDE: f32 = 0.2;

/// Bob range before `float_intensity` is applied.
const FLOAT_RANGE: f32 = 0.1;

/// Elapsed session time for the frame being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub elapsed: f32,
}

impl AnimationFrame {
    pub fn at(elapsed: f32) -> Self {
        Self { elapsed }
    }
}

/// Transform applied to a whole group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupDelta {
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub scale: f32,
}

/// Float/bob applied to a single object on top of its group transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatDelta {
    pub offset: Vec3,
    pub rotation: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAnimation {
    pub kind: GroupKind,
    pub group: GroupDelta,
    pub objects: Vec<FloatDelta>,
}

/// Computes the deltas of every object in `group` for `frame`.
pub fn update(frame: AnimationFrame, group: &ObjectGroup) -> GroupAnimation {
    GroupAnimation {
        kind: group.kind,
        group: group_delta(group.kind, frame.elapsed),
        objects: group
            .objects
            .iter()
            .enumerate()
            .map(|(index, object)| float_delta(group.kind, index, object, frame.elapsed))
            .collect(),
    }
}

pub fn group_delta(kind: GroupKind, elapsed: f32) -> GroupDelta {
    let spin = kind.spin();
    let mut rotation = spin.axis * (elapsed * spin.speed);
    let mut scale = 1.0;

    match kind {
        GroupKind::Stars => rotation.z = star_tilt(elapsed),
        GroupKind::Heart => scale = heart_pulse(elapsed),
        GroupKind::Orbs => {}
    }

    GroupDelta { rotation, scale }
}

/// Breathing scale of the heart, always within `1 ± HEART_PULSE_AMPLITUDE`.
pub fn heart_pulse(elapsed: f32) -> f32 {
    1.0 + (elapsed * HEART_PULSE_RATE).sin() * HEART_PULSE_AMPLITUDE
}

pub fn star_tilt(elapsed: f32) -> f32 {
    (elapsed * STAR_TILT_RATE).sin() * STAR_TILT_AMPLITUDE
}

pub fn float_delta(
    kind: GroupKind,
    index: usize,
    object: &DecorativeObject,
    elapsed: f32,
) -> FloatDelta {
    let profile = kind.float_profile();
    let tau = (elapsed + object.animation_phase) * profile.speed(index) / 4.0;
    let (sin, cos) = tau.sin_cos();

    FloatDelta {
        offset: Vec3::new(0.0, sin * FLOAT_RANGE * profile.float_intensity, 0.0),
        rotation: Vec3::new(cos / 8.0, sin / 8.0, sin / 20.0) * profile.rotation_intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RotationSource;

    fn group(kind: GroupKind, count: i32) -> ObjectGroup {
        ObjectGroup::new(kind, count, RotationSource::Seeded(1))
    }

    #[test]
    fn update_is_idempotent() {
        for kind in GroupKind::ALL {
            let g = group(kind, 8);
            let frame = AnimationFrame::at(12.34);
            assert_eq!(update(frame, &g), update(frame, &g));
        }
    }

    #[test]
    fn evaluation_order_does_not_leak() {
        let g = group(GroupKind::Orbs, 15);
        let before = update(AnimationFrame::at(3.0), &g);
        let _ = update(AnimationFrame::at(100.0), &g);
        assert_eq!(update(AnimationFrame::at(3.0), &g), before);
    }

    #[test]
    fn heart_pulse_stays_bounded() {
        for step in 0..10_000 {
            let t = step as f32 * 0.0137;
            let s = heart_pulse(t);
            assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&s), "pulse {s} at {t}");
        }
        assert_eq!(heart_pulse(0.0), 1.0);
    }

    #[test]
    fn group_spins_follow_their_speeds() {
        let orbs = group_delta(GroupKind::Orbs, 10.0);
        assert!((orbs.rotation.y - 2.0).abs() < 1e-5);
        assert_eq!(orbs.scale, 1.0);

        let heart = group_delta(GroupKind::Heart, 2.0);
        assert!((heart.rotation.y - 1.0).abs() < 1e-6);
        assert!((heart.scale - heart_pulse(2.0)).abs() < 1e-6);
    }

    #[test]
    fn stars_tilt_on_z() {
        let t = 5.0;
        let stars = group_delta(GroupKind::Stars, t);
        assert!((stars.rotation.z - (0.3f32 * t).sin() * 0.2).abs() < 1e-6);
        assert!(stars.rotation.z.abs() <= STAR_TILT_AMPLITUDE);
        assert_eq!(stars.rotation.y, 0.0);
    }

    #[test]
    fn float_speed_varies_by_index() {
        let g = group(GroupKind::Orbs, 15);
        let animation = update(AnimationFrame::at(7.5), &g);
        assert_eq!(animation.objects.len(), 15);

        let profile = GroupKind::Orbs.float_profile();
        for (index, (delta, object)) in animation.objects.iter().zip(&g.objects).enumerate() {
            let tau = (7.5 + object.animation_phase) * profile.speed(index) / 4.0;
            let expected = tau.sin() * 0.1 * profile.float_intensity;
            assert!((delta.offset.y - expected).abs() < 1e-5);
            assert!(delta.offset.y.abs() <= 0.1 * profile.float_intensity + 1e-6);
            assert_eq!(delta.offset.x, 0.0);
        }
    }

    #[test]
    fn empty_group_has_no_object_deltas() {
        let g = group(GroupKind::Stars, 0);
        let animation = update(AnimationFrame::at(1.0), &g);
        assert!(animation.objects.is_empty());
        assert_eq!(animation.kind, GroupKind::Stars);
    }
}
