//! Vector and rotation helpers for the leg chain, on top of nalgebra.
//!
//! Angles are radians. `yaw` turns about the vertical axis (the coxa joint),
//! `pitch` about the y axis (femur and tibia). Both follow the right-hand
//! rule, so `pitch(-phi)` lifts a vector lying on +x towards +z.
use nalgebra::{Rotation3, Vector3};

pub type Vec3 = Vector3<f64>;

/// Rotation about the vertical axis.
pub fn yaw(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Rotation about the y axis.
pub fn pitch(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle)
}

/// Vector of length `len` along the local x axis (a fully extended segment).
pub fn along_x(len: f64) -> Vec3 {
    Vec3::x() * len
}

pub fn up(z: f64) -> Vec3 {
    Vec3::z() * z
}

/// Length of the projection on the ground plane.
pub fn horizontal(v: &Vec3) -> f64 {
    v.xy().norm()
}

pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}
