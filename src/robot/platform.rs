//! The hexagonal body and its six legs.
//!
//! Legs are mounted at the midpoints of the hexagon's edges, leg `i` facing
//! `60° * i + 30°`. Each leg works in its own frame (x pointing away from the
//! body); the platform rotates requests into and results out of that frame.
//! Body geometry is fixed at construction, only joint angles change per tick.
use core::f64::consts::PI;

use log::{debug, info};

use crate::kinematics::conversion::{
    AnchorConfig, JointAngles, KinematicsError, LegGeometry, LegKinematics,
};
use crate::kinematics::gait_engine::{GaitPath, GaitPattern, GaitSchedule, StrideParams};
use crate::kinematics::vector::{self, Vec3};
use crate::robot::leg::{Leg, LEG_COUNT};

/// Where and in which direction a leg is attached to the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mount {
    pub angle: f64,
    pub point: Vec3,
}

/// A leg drawn in the body frame: mount point, coxa end, knee, foot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegFrame {
    pub leg: Leg,
    /// Joint angles the points were computed from.
    pub angles: JointAngles,
    pub points: [Vec3; 4],
}

impl LegFrame {
    pub fn mount(&self) -> Vec3 {
        self.points[0]
    }

    pub fn foot(&self) -> Vec3 {
        self.points[3]
    }

    /// Start and end of each segment.
    pub fn segments(&self) -> [(Vec3, Vec3); 3] {
        let p = self.points;
        [(p[0], p[1]), (p[1], p[2]), (p[2], p[3])]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    radius: f64,
    apothem: f64,
    hexagon: [Vec3; LEG_COUNT],
    mounts: [Mount; LEG_COUNT],
    legs: [LegKinematics; LEG_COUNT],
}

impl Platform {
    /// Body with circumradius `radius` and six identical legs.
    pub fn new(radius: f64, geometry: LegGeometry) -> Self {
        let apothem = libm::sqrt(3.0) / 2.0 * radius;
        let (a, h) = (radius, apothem);
        let hexagon = [
            Vec3::new(a, 0.0, 0.0),
            Vec3::new(a / 2.0, h, 0.0),
            Vec3::new(-a / 2.0, h, 0.0),
            Vec3::new(-a, 0.0, 0.0),
            Vec3::new(-a / 2.0, -h, 0.0),
            Vec3::new(a / 2.0, -h, 0.0),
        ];
        let mounts = core::array::from_fn(|i| {
            let (p1, p2) = (hexagon[i], hexagon[(i + 1) % LEG_COUNT]);
            Mount {
                angle: PI / 3.0 * i as f64 + PI / 6.0,
                point: (p1 + p2) * 0.5,
            }
        });

        info!("[PLATFORM] body radius {radius}, apothem {apothem:.3}, legs {geometry:?}");
        Self {
            radius,
            apothem,
            hexagon,
            mounts,
            legs: [LegKinematics::new(geometry); LEG_COUNT],
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn apothem(&self) -> f64 {
        self.apothem
    }

    /// Body outline, counter-clockwise from `(a, 0)`.
    pub fn hexagon(&self) -> &[Vec3; LEG_COUNT] {
        &self.hexagon
    }

    pub fn mount(&self, leg: Leg) -> &Mount {
        &self.mounts[leg.index()]
    }

    pub fn mount_angle(&self, leg: Leg) -> f64 {
        self.mount(leg).angle
    }

    pub fn mount_point(&self, leg: Leg) -> Vec3 {
        self.mount(leg).point
    }

    pub fn leg(&self, leg: Leg) -> &LegKinematics {
        &self.legs[leg.index()]
    }

    /// Per-leg access, e.g. to give a single leg its own anchor.
    pub fn leg_mut(&mut self, leg: Leg) -> &mut LegKinematics {
        &mut self.legs[leg.index()]
    }

    pub fn legs(&self) -> &[LegKinematics; LEG_COUNT] {
        &self.legs
    }

    pub fn set_anchor(&mut self, anchor: AnchorConfig) {
        for leg in self.legs.iter_mut() {
            leg.set_anchor(anchor);
        }
    }

    pub fn set_anchor_length(&mut self, length: f64) {
        for leg in self.legs.iter_mut() {
            leg.set_anchor_length(length);
        }
    }

    pub fn set_anchor_height(&mut self, height: f64) {
        for leg in self.legs.iter_mut() {
            leg.set_anchor_height(height);
        }
    }

    pub fn set_recovery_height(&mut self, height: f64) {
        for leg in self.legs.iter_mut() {
            leg.set_recovery_height(height);
        }
    }

    /// Gait path of one leg for a stride given in the body frame.
    pub fn create_path(
        &self,
        leg: Leg,
        stride: &StrideParams,
    ) -> Result<GaitPath, KinematicsError> {
        let local = stride.with_angle(stride.angle - self.mount_angle(leg));
        self.leg(leg).create_path(&local).inspect_err(|e| {
            debug!("[PLATFORM] {leg} leg path failed: {e}");
        })
    }

    /// One gait path per leg, all walking towards `stride.angle` in the body frame.
    ///
    /// Stops at the first leg whose path cannot be built.
    pub fn create_paths(
        &self,
        stride: &StrideParams,
    ) -> Result<[GaitPath; LEG_COUNT], KinematicsError> {
        let path = |leg| self.create_path(leg, stride);
        let paths = [
            path(Leg::FrontRight)?,
            path(Leg::Front)?,
            path(Leg::FrontLeft)?,
            path(Leg::BackLeft)?,
            path(Leg::Back)?,
            path(Leg::BackRight)?,
        ];
        info!(
            "[PLATFORM] created {} paths of {} samples",
            LEG_COUNT,
            paths[0].len()
        );
        Ok(paths)
    }

    pub fn schedule(
        &self,
        stride: &StrideParams,
        pattern: GaitPattern,
    ) -> Result<GaitSchedule, KinematicsError> {
        Ok(GaitSchedule::new(self.create_paths(stride)?, pattern))
    }

    /// Runs forward kinematics on `leg` and places the result on the body.
    pub fn update_foot_by_angles(&self, leg: Leg, angles: JointAngles) -> LegFrame {
        let pose = self.leg(leg).forward(angles);
        let Mount { angle, point } = *self.mount(leg);

        let to_body = vector::yaw(angle);
        let mut points = [point; 4];
        for (i, segment) in pose.segments.iter().enumerate() {
            points[i + 1] = points[i] + to_body * *segment;
        }
        LegFrame {
            leg,
            angles,
            points,
        }
    }

    /// Body-frame pose of every leg at `tick` of a schedule.
    pub fn tick(&self, schedule: &GaitSchedule, tick: usize) -> [LegFrame; LEG_COUNT] {
        Leg::ALL.map(|leg| self.update_foot_by_angles(leg, schedule.angles_at(leg, tick)))
    }

    /// Frames with every leg at the same joint angles.
    pub fn pose_all(&self, angles: JointAngles) -> [LegFrame; LEG_COUNT] {
        Leg::ALL.map(|leg| self.update_foot_by_angles(leg, angles))
    }

    /// Frames with every foot on its own anchor point.
    pub fn stand(&self) -> Result<[LegFrame; LEG_COUNT], KinematicsError> {
        let mut angles = [JointAngles::NEUTRAL; LEG_COUNT];
        for leg in Leg::ALL {
            let kin = self.leg(leg);
            angles[leg.index()] = kin.inverse(kin.anchor().anchor_point())?;
        }
        Ok(Leg::ALL.map(|leg| self.update_foot_by_angles(leg, angles[leg.index()])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::config::PlatformConfig;

    fn platform() -> Platform {
        PlatformConfig::default().build().unwrap()
    }

    fn assert_close(a: Vec3, b: Vec3, tol: f64) {
        assert!((a - b).norm() < tol, "{a:?} != {b:?}");
    }

    #[test]
    fn geometry_is_a_regular_hexagon() {
        let platform = platform();
        let h = platform.apothem();
        assert!((h - 86.602_540_378).abs() < 1e-6);
        for (i, v) in platform.hexagon().iter().enumerate() {
            assert!((v.norm() - 100.0).abs() < 1e-9);
            let next = platform.hexagon()[(i + 1) % LEG_COUNT];
            assert!(((v - next).norm() - 100.0).abs() < 1e-9);
        }
        for leg in Leg::ALL {
            let angle = platform.mount_angle(leg);
            assert!((angle - (60.0 * leg.index() as f64 + 30.0).to_radians()).abs() < 1e-12);
            let expected = vector::yaw(angle) * vector::along_x(h);
            assert_close(platform.mount_point(leg), expected, 1e-9);
        }
    }

    #[test]
    fn neutral_leg_points_straight_out_of_its_edge() {
        let platform = platform();
        let frame = platform.update_foot_by_angles(Leg::FrontLeft, JointAngles::NEUTRAL);
        let out = vector::yaw(platform.mount_angle(Leg::FrontLeft)) * vector::along_x(1.0);
        assert_close(frame.mount(), platform.mount_point(Leg::FrontLeft), 1e-12);
        assert_close(frame.foot(), frame.mount() + out * 180.0, 1e-9);
        assert_close(frame.segments()[1].0, frame.mount() + out * 30.0, 1e-9);
    }

    #[test]
    fn broadcast_setters_reach_every_leg() {
        let mut platform = platform();
        platform.set_anchor_length(110.0);
        platform.set_anchor_height(-40.0);
        platform.set_recovery_height(-10.0);
        for leg in platform.legs() {
            assert_eq!(leg.anchor().anchor_point(), Vec3::new(110.0, 0.0, -40.0));
            assert_eq!(leg.anchor().recovery_height, -10.0);
        }
        platform.leg_mut(Leg::Back).set_anchor_length(100.0);
        assert_eq!(platform.leg(Leg::Back).anchor().anchor_length, 100.0);
        assert_eq!(platform.leg(Leg::Front).anchor().anchor_length, 110.0);
    }

    #[test]
    fn paths_are_identical_once_mount_rotation_is_removed() {
        let platform = platform();
        let stride = PlatformConfig::default().stride;
        let paths = platform.create_paths(&stride).unwrap();

        let body_offsets = |leg: Leg| -> alloc::vec::Vec<Vec3> {
            let kin = platform.leg(leg);
            let anchor = kin.anchor().anchor_point();
            paths[leg.index()]
                .iter()
                .map(|a| vector::yaw(platform.mount_angle(leg)) * (kin.forward(*a).foot - anchor))
                .collect()
        };
        let reference = body_offsets(Leg::FrontRight);
        for leg in Leg::ALL {
            let offsets = body_offsets(leg);
            assert_eq!(offsets.len(), reference.len());
            for (got, want) in offsets.iter().zip(&reference) {
                assert_close(*got, *want, 1e-6);
            }
        }
        // the stance moves the feet along the stride direction in the body frame
        let step = reference[1] - reference[0];
        assert_close(step, vector::yaw(stride.angle) * vector::along_x(2.5), 1e-6);
    }

    #[test]
    fn unreachable_stride_aborts_path_creation() {
        let platform = platform();
        let stride = StrideParams::new(10, 5.0, 0.0);
        assert!(matches!(
            platform.create_paths(&stride),
            Err(KinematicsError::UnreachableTarget { .. })
        ));
    }

    #[test]
    fn tick_matches_single_leg_updates() {
        let platform = platform();
        let schedule = platform
            .schedule(&PlatformConfig::default().stride, GaitPattern::TRIPOD)
            .unwrap();
        let frames = platform.tick(&schedule, 12);
        for leg in Leg::ALL {
            let expected = platform.update_foot_by_angles(leg, schedule.angles_at(leg, 12));
            assert_eq!(frames[leg.index()], expected);
            assert_eq!(frames[leg.index()].leg, leg);
        }
    }

    #[test]
    fn stand_puts_every_foot_on_its_anchor() {
        let platform = platform();
        let frames = platform.stand().unwrap();
        for leg in Leg::ALL {
            let anchor = platform.leg(leg).anchor().anchor_point();
            let expected = platform.mount_point(leg) + vector::yaw(platform.mount_angle(leg)) * anchor;
            assert_close(frames[leg.index()].foot(), expected, 1e-6);
        }
    }
}
