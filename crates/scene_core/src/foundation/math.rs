//! Math type aliases used by the built-in components

/// 3D vector
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Unit quaternion rotation
pub type Quat = nalgebra::UnitQuaternion<f32>;
