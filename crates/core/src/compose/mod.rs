//! Merges the memoized layout with the current frame's animation and the
//! interaction state into a drawable description.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    animation::{self, AnimationFrame, FloatDelta, GroupDelta},
    camera::{CameraControlConfig, CameraSetup},
    config::SceneConfig,
    interaction::InteractionState,
    layout::{DecorativeObject, Geometry, GroupKind, Material, ObjectGroup, Rgb, SceneLayout},
    lighting::LightingRig,
    starfield::StarfieldParams,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectFrame {
    pub index: usize,
    /// Object to world, including the group transform.
    pub transform: Mat4,
    pub color: Rgb,
}

impl ObjectFrame {
    pub fn world_position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupFrame {
    pub kind: GroupKind,
    pub geometry: Geometry,
    pub material: Material,
    pub delta: GroupDelta,
    pub transform: Mat4,
    pub objects: Vec<ObjectFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub elapsed: f32,
    pub camera: CameraSetup,
    pub controls: CameraControlConfig,
    pub lighting: LightingRig,
    pub starfield: StarfieldParams,
    pub groups: Vec<GroupFrame>,
    pub overlay_visible: bool,
}

impl SceneFrame {
    pub fn group(&self, kind: GroupKind) -> Option<&GroupFrame> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    pub fn object_count(&self) -> usize {
        self.groups.iter().map(|g| g.objects.len()).sum()
    }
}

/// Builds the frame for `frame.elapsed`. Holds no state between calls.
pub fn compose(
    layout: &SceneLayout,
    frame: AnimationFrame,
    interaction: InteractionState,
    config: &SceneConfig,
) -> SceneFrame {
    SceneFrame {
        elapsed: frame.elapsed,
        camera: CameraSetup::from_config(&config.camera),
        controls: CameraControlConfig::derive(interaction, &config.camera),
        lighting: LightingRig::default(),
        starfield: layout.starfield.params,
        groups: layout.groups().map(|g| compose_group(g, frame)).collect(),
        overlay_visible: interaction.show_overlay(),
    }
}

fn compose_group(group: &ObjectGroup, frame: AnimationFrame) -> GroupFrame {
    let animation = animation::update(frame, group);
    let delta = animation.group;

    // The heart's spin and pulse drive the mesh itself, beneath its float.
    let (transform, object_delta) = match group.kind {
        GroupKind::Heart => (Mat4::IDENTITY, Some(delta)),
        GroupKind::Orbs | GroupKind::Stars => (group_matrix(&delta), None),
    };

    let objects = group
        .objects
        .iter()
        .zip(&animation.objects)
        .enumerate()
        .map(|(index, (object, float))| ObjectFrame {
            index,
            transform: transform * float_matrix(float) * local_matrix(object, object_delta),
            color: object.color,
        })
        .collect();

    GroupFrame {
        kind: group.kind,
        geometry: group.geometry,
        material: group.material,
        delta,
        transform,
        objects,
    }
}

fn euler(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

fn group_matrix(delta: &GroupDelta) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(delta.scale),
        euler(delta.rotation),
        Vec3::ZERO,
    )
}

fn float_matrix(float: &FloatDelta) -> Mat4 {
    Mat4::from_rotation_translation(euler(float.rotation), float.offset)
}

fn local_matrix(object: &DecorativeObject, delta: Option<GroupDelta>) -> Mat4 {
    let (rotation, scale) = match delta {
        Some(delta) => (object.rotation + delta.rotation, object.scale * delta.scale),
        None => (object.rotation, object.scale),
    };
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), euler(rotation), object.position)
}
