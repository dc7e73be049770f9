//! Physical and walking constants of the platform.
//!
//! The constants describe the reference build; [`PlatformConfig`] bundles them
//! so a caller can override single values before building a [`Platform`].
use core::f64::consts::PI;

use crate::kinematics::conversion::{AnchorConfig, GeometryError, LegGeometry};
use crate::kinematics::gait_engine::{GaitPattern, StrideParams};
use crate::robot::leg::LEG_COUNT;
use crate::robot::platform::Platform;
use crate::robot::servo::ServoMap;

// BODY SIZE
/// Circumradius of the hexagonal body.
pub const BODY_RADIUS: f64 = 100.0;
pub const LENGTH_COXA: f64 = 30.0;
pub const LENGTH_FEMUR: f64 = 50.0;
pub const LENGTH_TIBIA: f64 = 100.0;

// STANCE
pub const ANCHOR_LENGTH: f64 = 120.0;
pub const ANCHOR_HEIGHT: f64 = -50.0;
pub const RECOVERY_HEIGHT: f64 = -20.0;

// STRIDE
pub const STRIDE_SAMPLES: usize = 10;
pub const STRIDE_STEP: f64 = 2.5;
pub const STRIDE_ANGLE: f64 = PI * 3.0 / 4.0;

// SERVOS
/// Tibia servo centred on a right-angle knee, so every knee-up pose fits its range.
pub const SERVO_OFFSETS: [f32; 3] = [0.0, 0.0, 90.0];

/// Delay between two gait ticks of the walking demo.
pub const TICK_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformConfig {
    pub body_radius: f64,
    /// Coxa, femur and tibia length, identical for all six legs.
    pub lengths: [f64; 3],
    pub anchor: AnchorConfig,
    pub stride: StrideParams,
    pub pattern: GaitPattern,
    pub servos: [ServoMap; LEG_COUNT],
    pub tick_ms: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            body_radius: BODY_RADIUS,
            lengths: [LENGTH_COXA, LENGTH_FEMUR, LENGTH_TIBIA],
            anchor: AnchorConfig {
                anchor_length: ANCHOR_LENGTH,
                anchor_height: ANCHOR_HEIGHT,
                recovery_height: RECOVERY_HEIGHT,
            },
            stride: StrideParams::new(STRIDE_SAMPLES, STRIDE_STEP, STRIDE_ANGLE),
            pattern: GaitPattern::TRIPOD,
            servos: [ServoMap::new(SERVO_OFFSETS, false); LEG_COUNT],
            tick_ms: TICK_MS,
        }
    }
}

impl PlatformConfig {
    /// Platform with these lengths and every leg anchored as configured.
    pub fn build(&self) -> Result<Platform, GeometryError> {
        let geometry = LegGeometry::try_from(self.lengths)?;
        let mut platform = Platform::new(self.body_radius, geometry);
        platform.set_anchor(self.anchor);
        Ok(platform)
    }
}
