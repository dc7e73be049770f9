//! Joint angle to servo signal conversion.
//!
//! Maps each joint angle onto the PWM tick range of a PCA9685-style driver
//! running hobby servos at 50 Hz. Writing the ticks to hardware is the
//! caller's business; this module only computes them and refuses angles the
//! servo cannot reach.
use core::fmt::{self, Display};

use micromath::F32Ext;

use crate::kinematics::conversion::JointAngles;
use crate::robot::joint::Joint;

// --- Servo Configuration ---
pub const SERVO_ANGLE_MIN: f32 = -90.0;
pub const SERVO_ANGLE_DEFAULT: f32 = 0.0;
pub const SERVO_ANGLE_MAX: f32 = 90.0;

pub const SERVO_SIG_MIN: f32 = 103.0;
pub const SERVO_SIG_DEFAULT: f32 = 307.0;
pub const SERVO_SIG_MAX: f32 = 511.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServoError {
    /// Angle in degrees after inversion and offset.
    OutOfRange { joint: Joint, angle: f32 },
}

impl Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServoError::OutOfRange { joint, angle } => write!(
                f,
                "{joint} angle {angle}° outside [{SERVO_ANGLE_MIN}°, {SERVO_ANGLE_MAX}°]"
            ),
        }
    }
}

impl core::error::Error for ServoError {}

/// Linear map from degrees to PWM ticks, no range check.
pub fn angle_to_ticks(angle: f32) -> u16 {
    let ratio = (angle - SERVO_ANGLE_MIN) / (SERVO_ANGLE_MAX - SERVO_ANGLE_MIN);
    let tick = SERVO_SIG_MIN + ratio * (SERVO_SIG_MAX - SERVO_SIG_MIN);
    F32Ext::round(tick).clamp(0.0, u16::MAX as f32) as u16
}

/// Calibration of the three servos of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ServoMap {
    /// Degrees added to each joint after inversion.
    pub offsets: [f32; 3],
    /// Mirrored legs turn their servos the other way round.
    pub inverted: bool,
}

impl ServoMap {
    pub fn new(offsets: [f32; 3], inverted: bool) -> Self {
        Self { offsets, inverted }
    }

    /// Ticks for one joint angle given in radians.
    pub fn signal(&self, joint: Joint, radians: f64) -> Result<u16, ServoError> {
        let mut angle = radians.to_degrees() as f32;
        if self.inverted {
            angle = -angle;
        }
        angle += self.offsets[joint as usize];

        if !(SERVO_ANGLE_MIN..=SERVO_ANGLE_MAX).contains(&angle) {
            return Err(ServoError::OutOfRange { joint, angle });
        }
        Ok(angle_to_ticks(angle))
    }

    /// Ticks for a whole leg, coxa first.
    pub fn signals(&self, angles: JointAngles) -> Result<[u16; 3], ServoError> {
        Ok([
            self.signal(Joint::Coxa, angles[Joint::Coxa])?,
            self.signal(Joint::Femur, angles[Joint::Femur])?,
            self.signal(Joint::Tibia, angles[Joint::Tibia])?,
        ])
    }
}
