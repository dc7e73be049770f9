//! Forward and inverse kinematics of a single three-segment leg.
//!
//! The leg frame has its origin at the coxa pivot, x pointing away from the
//! body and z pointing up. A fully extended leg lies along +x. All angles are
//! radians:
//! - `coxa` (phi1) yaws the whole chain about z,
//! - `femur` (phi2) pitches the second segment, positive lifts it,
//! - `tibia` (phi3) pitches the third segment relative to the second.
//!
//! Both directions are pure: nothing is cached between calls, the caller keeps
//! whichever [`JointAngles`] or [`LegPose`] it needs.
use core::f64::consts::PI;
use core::fmt::{self, Display};

use super::vector::{self, Vec3};

/// Segment lengths of one leg: coxa (yaw link), femur (upper link), tibia (lower link).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegGeometry {
    coxa: f64,
    femur: f64,
    tibia: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryError {
    pub lengths: [f64; 3],
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment lengths must be positive and finite, got {:?}",
            self.lengths
        )
    }
}

impl core::error::Error for GeometryError {}

impl LegGeometry {
    pub fn new(coxa: f64, femur: f64, tibia: f64) -> Result<Self, GeometryError> {
        let lengths = [coxa, femur, tibia];
        if lengths.iter().any(|l| !l.is_finite() || *l <= 0.0) {
            return Err(GeometryError { lengths });
        }
        Ok(Self { coxa, femur, tibia })
    }

    pub fn coxa(&self) -> f64 {
        self.coxa
    }

    pub fn femur(&self) -> f64 {
        self.femur
    }

    pub fn tibia(&self) -> f64 {
        self.tibia
    }

    /// Longest distance femur and tibia can span together.
    pub fn max_reach(&self) -> f64 {
        self.femur + self.tibia
    }

    /// Shortest distance femur and tibia can span (fully folded).
    pub fn min_reach(&self) -> f64 {
        libm::fabs(self.femur - self.tibia)
    }

    /// The three segments in their neutral, fully extended orientation.
    pub fn neutral_vectors(&self) -> [Vec3; 3] {
        [
            vector::along_x(self.coxa),
            vector::along_x(self.femur),
            vector::along_x(self.tibia),
        ]
    }
}

impl TryFrom<[f64; 3]> for LegGeometry {
    type Error = GeometryError;

    fn try_from([coxa, femur, tibia]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(coxa, femur, tibia)
    }
}

/// Joint angle triple `(phi1, phi2, phi3)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub coxa: f64,
    pub femur: f64,
    pub tibia: f64,
}

impl JointAngles {
    /// All joints at zero: every segment along the leg's x axis.
    pub const NEUTRAL: JointAngles = JointAngles::new(0.0, 0.0, 0.0);

    pub const fn new(coxa: f64, femur: f64, tibia: f64) -> Self {
        Self { coxa, femur, tibia }
    }

    /// Folded resting pose: femur raised 45°, tibia bent 90° down.
    pub fn folded() -> Self {
        Self::new(0.0, PI / 4.0, -PI / 2.0)
    }
}

impl From<[f64; 3]> for JointAngles {
    fn from([coxa, femur, tibia]: [f64; 3]) -> Self {
        Self::new(coxa, femur, tibia)
    }
}

/// Outcome of forward kinematics: the rotated segments and where they end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegPose {
    pub angles: JointAngles,
    pub segments: [Vec3; 3],
    pub foot: Vec3,
}

impl LegPose {
    /// Cumulative end points of the chain, starting at the coxa pivot.
    pub fn joints(&self) -> [Vec3; 4] {
        let [v1, v2, v3] = self.segments;
        [Vec3::zeros(), v1, v1 + v2, v1 + v2 + v3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    /// The femur/tibia pair cannot span the distance to the target.
    UnreachableTarget {
        distance: f64,
        min_reach: f64,
        max_reach: f64,
    },
    /// A gait path needs at least one sample per segment.
    InvalidStride { num_iter: usize },
}

impl Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::UnreachableTarget {
                distance,
                min_reach,
                max_reach,
            } => write!(
                f,
                "target unreachable: distance {distance} outside [{min_reach}, {max_reach}]"
            ),
            KinematicsError::InvalidStride { num_iter } => {
                write!(f, "invalid stride: {num_iter} samples per segment")
            }
        }
    }
}

impl core::error::Error for KinematicsError {}

/// Where a leg stands when idle and how high it lifts while swinging.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorConfig {
    /// Forward (x) offset of the neutral stance point.
    pub anchor_length: f64,
    /// Height (z) of the stance point, negative below the coxa pivot.
    pub anchor_height: f64,
    /// Extra z offset applied while the foot is off the ground.
    pub recovery_height: f64,
}

impl AnchorConfig {
    pub fn anchor_point(&self) -> Vec3 {
        Vec3::new(self.anchor_length, 0.0, self.anchor_height)
    }

    pub fn lift(&self) -> Vec3 {
        vector::up(self.recovery_height)
    }
}

/// Kinematics engine of one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegKinematics {
    geometry: LegGeometry,
    anchor: AnchorConfig,
}

impl LegKinematics {
    pub fn new(geometry: LegGeometry) -> Self {
        Self {
            geometry,
            anchor: AnchorConfig::default(),
        }
    }

    pub fn geometry(&self) -> &LegGeometry {
        &self.geometry
    }

    pub fn anchor(&self) -> &AnchorConfig {
        &self.anchor
    }

    pub fn set_anchor(&mut self, anchor: AnchorConfig) -> &mut Self {
        self.anchor = anchor;
        self
    }

    pub fn set_anchor_length(&mut self, length: f64) -> &mut Self {
        self.anchor.anchor_length = length;
        self
    }

    pub fn set_anchor_height(&mut self, height: f64) -> &mut Self {
        self.anchor.anchor_height = height;
        self
    }

    pub fn set_recovery_height(&mut self, height: f64) -> &mut Self {
        self.anchor.recovery_height = height;
        self
    }

    /// Joint angles to segment vectors and foot position. Accepts any angles.
    pub fn forward(&self, angles: JointAngles) -> LegPose {
        let [n1, n2, n3] = self.geometry.neutral_vectors();
        let yaw = vector::yaw(angles.coxa);
        let segments = [
            yaw * n1,
            yaw * vector::pitch(-angles.femur) * n2,
            yaw * vector::pitch(-(angles.femur + angles.tibia)) * n3,
        ];
        let [v1, v2, v3] = segments;

        LegPose {
            angles,
            segments,
            foot: v1 + v2 + v3,
        }
    }

    /// Foot position to joint angles, knee above the femur-to-foot line.
    pub fn inverse(&self, target: Vec3) -> Result<JointAngles, KinematicsError> {
        let l1 = self.geometry.coxa;
        let (a, b) = (self.geometry.tibia, self.geometry.femur);

        // top view gives the coxa yaw directly
        let phi1 = libm::atan2(target.y, target.x);
        let radius = vector::horizontal(&target);
        let c = (target - vector::yaw(phi1) * vector::along_x(l1)).norm();

        let unreachable = KinematicsError::UnreachableTarget {
            distance: c,
            min_reach: self.geometry.min_reach(),
            max_reach: self.geometry.max_reach(),
        };
        // written so that a NaN distance fails as well
        if !vector::is_finite(&target) || !(c <= self.geometry.max_reach()) {
            return Err(unreachable);
        }
        if c < self.geometry.min_reach() || c == 0.0 {
            return Err(unreachable);
        }

        // triangle femur pivot / knee / foot, law of cosines on both free angles
        let gamma = libm::acos(unit((a * a + b * b - c * c) / (2.0 * a * b)));
        let alpha = libm::acos(unit((b * b + c * c - a * a) / (2.0 * b * c)));
        // elevation of the femur-pivot-to-foot line
        let eta = libm::atan2(target.z, radius - l1);

        Ok(JointAngles::new(phi1, alpha + eta, gamma - PI))
    }
}

/// Clamp rounding noise back into the arccosine domain.
fn unit(v: f64) -> f64 {
    v.clamp(-1.0, 1.0)
}
