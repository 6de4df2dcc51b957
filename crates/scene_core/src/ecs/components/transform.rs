//! Transform component
//!
//! Position, rotation and scale of the owning node. Every [`GameObject`]
//! starts with one.
//!
//! [`GameObject`]: crate::ecs::GameObject

use parking_lot::RwLock;

use crate::activation::{Activate, ConstructorTable};
use crate::ecs::{Component, ComponentCore, ComponentRef};
use crate::foundation::math::{Mat4, Quat, Vec3};

/// Plain transform data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Position
    pub position: Vec3,
    /// Rotation
    pub rotation: Quat,
    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformState {
    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Transform component
#[derive(Debug)]
pub struct Transform {
    core: ComponentCore,
    state: RwLock<TransformState>,
}

impl Transform {
    /// Component name used for every transform
    pub const NAME: &'static str = "Transform";

    /// Identity transform
    pub fn new() -> Self {
        Self::from_state(TransformState::default())
    }

    /// Transform at a position
    pub fn from_position(position: Vec3) -> Self {
        Self::from_state(TransformState {
            position,
            ..TransformState::default()
        })
    }

    /// Transform from full state
    pub fn from_state(state: TransformState) -> Self {
        Self {
            core: ComponentCore::new(Self::NAME),
            state: RwLock::new(state),
        }
    }

    /// Copy of the current state
    pub fn state(&self) -> TransformState {
        *self.state.read()
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.state.read().position
    }

    /// Replace the position
    pub fn set_position(&self, position: Vec3) {
        self.state.write().position = position;
    }

    /// Offset the position
    pub fn translate(&self, offset: Vec3) {
        self.state.write().position += offset;
    }

    /// Current rotation
    pub fn rotation(&self) -> Quat {
        self.state.read().rotation
    }

    /// Replace the rotation
    pub fn set_rotation(&self, rotation: Quat) {
        self.state.write().rotation = rotation;
    }

    /// Current scale
    pub fn scale(&self) -> Vec3 {
        self.state.read().scale
    }

    /// Replace the scale
    pub fn set_scale(&self, scale: Vec3) {
        self.state.write().scale = scale;
    }

    /// Transformation matrix of the current state
    pub fn to_matrix(&self) -> Mat4 {
        self.state.read().to_matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Transform {
    fn core(&self) -> &ComponentCore {
        &self.core
    }
}

impl Activate<ComponentRef> for Transform {
    fn constructors(table: &mut ConstructorTable<ComponentRef>) {
        table
            .constructor(|()| Self::new())
            .constructor(|(position,): (Vec3,)| Self::from_position(position))
            .constructor(|(state,): (TransformState,)| Self::from_state(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        let transform = Transform::new();
        assert_eq!(transform.name(), Transform::NAME);
        assert_relative_eq!(transform.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_translate_accumulates() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        transform.translate(Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(transform.position(), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_matrix_applies_scale_then_translation() {
        let transform = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        transform.set_scale(Vec3::new(2.0, 2.0, 2.0));

        let point = transform.to_matrix().transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point.x, 12.0);
        assert_relative_eq!(point.y, 0.0);
    }
}
